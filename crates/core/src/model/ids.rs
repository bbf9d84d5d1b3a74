use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric identifier of a lesson module (puberty, hygiene, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(u64);

impl ModuleId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slug naming one activity page, e.g. `handwashing-order` or `module-3-post-quiz`.
///
/// Slugs are trimmed, non-empty and may only contain ASCII letters, digits,
/// `-` and `_`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityId(String);

impl ActivityId {
    /// # Errors
    ///
    /// Returns `ParseIdError` if the slug is empty or contains other characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseIdError> {
        let raw = raw.into();
        let slug = raw.trim();
        let valid = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ParseIdError {
                kind: "ActivityId",
                raw,
            });
        }
        Ok(Self(slug.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivityId({})", self.0)
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ActivityId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActivityId> for String {
    fn from(value: ActivityId) -> Self {
        value.0
    }
}

// ─── FromStr ───────────────────────────────────────────────────────────────────

/// Error type for parsing an identifier from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from {:?}", self.kind, self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ModuleId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ModuleId::new)
            .map_err(|_| ParseIdError {
                kind: "ModuleId",
                raw: s.to_owned(),
            })
    }
}

impl FromStr for ActivityId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_id_parses_with_whitespace() {
        let id: ModuleId = " 3 ".parse().unwrap();
        assert_eq!(id, ModuleId::new(3));
        assert_eq!(id.to_string(), "3");
    }

    #[test]
    fn module_id_rejects_text() {
        assert!("puberty".parse::<ModuleId>().is_err());
    }

    #[test]
    fn activity_id_is_trimmed() {
        let id = ActivityId::new("  handwashing-order ").unwrap();
        assert_eq!(id.as_str(), "handwashing-order");
    }

    #[test]
    fn activity_id_rejects_empty_and_spaces() {
        assert!(ActivityId::new("   ").is_err());
        assert!(ActivityId::new("hand washing").is_err());
    }

    #[test]
    fn activity_id_deserializes_through_validation() {
        let ok: ActivityId = serde_json::from_str("\"quiz_1\"").unwrap();
        assert_eq!(ok.as_str(), "quiz_1");
        assert!(serde_json::from_str::<ActivityId>("\"bad id\"").is_err());
    }
}
