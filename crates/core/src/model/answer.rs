use serde::{Deserialize, Serialize};

/// A learner's response to one step.
///
/// The shape depends on the activity: quizzes record the chosen option,
/// ordering boards record the token placed in a slot, free-response steps
/// record text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Choice(usize),
    Sequence(Vec<usize>),
    Text(String),
}

impl AnswerValue {
    #[must_use]
    pub fn choice(&self) -> Option<usize> {
        match self {
            AnswerValue::Choice(index) => Some(*index),
            _ => None,
        }
    }

    /// Free text is compared trimmed and case-insensitively.
    #[must_use]
    pub fn matches(&self, expected: &AnswerValue) -> bool {
        match (self, expected) {
            (AnswerValue::Text(given), AnswerValue::Text(wanted)) => {
                given.trim().eq_ignore_ascii_case(wanted.trim())
            }
            _ => self == expected,
        }
    }
}
