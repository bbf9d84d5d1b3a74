use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("celebrate threshold must be at most 100, got {provided}")]
    InvalidCelebrateThreshold { provided: u8 },
}

/// Per-activity behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActivitySettings {
    /// Quiz pages keep "next" disabled until the current question has an answer.
    pub require_answer_to_advance: bool,
    /// Scores at or above this percentage get the celebration treatment.
    pub celebrate_threshold: u8,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            require_answer_to_advance: false,
            celebrate_threshold: 70,
        }
    }
}

impl ActivitySettings {
    /// Settings used by the quiz pages.
    #[must_use]
    pub fn quiz() -> Self {
        Self {
            require_answer_to_advance: true,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidCelebrateThreshold` above 100.
    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.celebrate_threshold > 100 {
            return Err(SettingsError::InvalidCelebrateThreshold {
                provided: self.celebrate_threshold,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn celebrates(&self, score_percent: u8) -> bool {
        score_percent >= self.celebrate_threshold
    }
}

/// Settings read from a config file. Only the fields present override the
/// activity's own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsOverrides {
    pub require_answer_to_advance: Option<bool>,
    pub celebrate_threshold: Option<u8>,
}

impl SettingsOverrides {
    #[must_use]
    pub fn apply(&self, base: &ActivitySettings) -> ActivitySettings {
        ActivitySettings {
            require_answer_to_advance: self
                .require_answer_to_advance
                .unwrap_or(base.require_answer_to_advance),
            celebrate_threshold: self.celebrate_threshold.unwrap_or(base.celebrate_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let settings: ActivitySettings =
            serde_json::from_str(r#"{"require_answer_to_advance": true}"#).unwrap();
        assert!(settings.require_answer_to_advance);
        assert_eq!(settings.celebrate_threshold, 70);
    }

    #[test]
    fn threshold_above_hundred_is_rejected() {
        let settings = ActivitySettings {
            celebrate_threshold: 101,
            ..ActivitySettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvalidCelebrateThreshold { provided: 101 })
        );
    }

    #[test]
    fn celebrates_at_threshold() {
        let settings = ActivitySettings::default();
        assert!(settings.celebrates(70));
        assert!(!settings.celebrates(69));
    }

    #[test]
    fn overrides_keep_unset_fields_from_base() {
        let overrides: SettingsOverrides =
            serde_json::from_str(r#"{"celebrate_threshold": 80}"#).unwrap();
        let merged = overrides.apply(&ActivitySettings::quiz());
        assert!(merged.require_answer_to_advance);
        assert_eq!(merged.celebrate_threshold, 80);
        assert_eq!(
            SettingsOverrides::default().apply(&ActivitySettings::quiz()),
            ActivitySettings::quiz()
        );
    }
}
