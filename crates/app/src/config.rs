use std::path::Path;

use anyhow::{Context, Result};
use lesson_core::model::SettingsOverrides;
use serde::Deserialize;
use services::SubmitterConfig;

/// Contents of the optional `--config` JSON file.
///
/// ```json
/// { "settings": { "celebrate_threshold": 80 },
///   "submitter": { "base_url": "https://lessons.example.org" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub settings: SettingsOverrides,
    pub submitter: Option<SubmitterConfig>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// File values win over the environment; `base_url` from the command
    /// line wins over both.
    pub fn submitter_config(&self, base_url: Option<String>) -> Result<SubmitterConfig> {
        let mut config = match &self.submitter {
            Some(config) => config.clone(),
            None => SubmitterConfig::from_env()?,
        };
        if let Some(base_url) = base_url {
            config.base_url = base_url;
        }
        Ok(config.validate()?)
    }
}
