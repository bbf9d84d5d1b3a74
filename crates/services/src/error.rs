//! Shared error types for the services crate.

use thiserror::Error;

use lesson_core::activity::{GatePhase, OrderingError, StepError, TopicError};
use lesson_core::model::{QuizError, SettingsError};

/// Errors returned by a submission collaborator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("submission endpoint returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Errors emitted by `ActivityController` for requests it refuses outright.
///
/// Submission problems never show up here; `submit` reports them as a
/// `SubmitOutcome` instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("activity is locked while {phase:?}")]
    Locked { phase: GatePhase },
    #[error("answer step {step} before moving on")]
    AnswerRequired { step: usize },
    #[error("option {option} does not exist on step {step} ({options} options)")]
    OptionOutOfRange {
        step: usize,
        option: usize,
        options: usize,
    },
    #[error("activity has no ordering board")]
    NotOrdering,
    #[error("activity has no topic tracker")]
    NotTopics,
    /// Ordering and topic steps only change through their own board or tracker.
    #[error("{activity} activities are answered by {how}")]
    UnsupportedInput {
        activity: &'static str,
        how: &'static str,
    },
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors emitted while building service configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("endpoint path must not be empty")]
    EmptyEndpoint,
    #[error("timeout must be at least one second")]
    ZeroTimeout,
    #[error("timeout must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}
