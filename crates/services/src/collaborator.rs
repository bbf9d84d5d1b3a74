use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lesson_core::model::{
    ActivityId, ActivityResult, ActivitySettings, AnswerValue, ModuleId, QuizKind,
};

use crate::error::SubmissionError;

/// Payload handed to the submission collaborator once an activity is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub activity_id: ActivityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<ModuleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_type: Option<QuizKind>,
    pub answers: BTreeMap<usize, AnswerValue>,
    pub score_percent: u8,
    pub correct_count: usize,
    pub total_steps: usize,
    pub completed_at: DateTime<Utc>,
}

/// Opaque reply from the collaborator. Only its arrival matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Acknowledgment(serde_json::Value);

impl Acknowledgment {
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(serde_json::Value::Null)
    }

    #[must_use]
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

/// Whoever records a finished activity (server endpoint, analytics store, ...).
#[async_trait]
pub trait SubmissionCollaborator: Send + Sync {
    async fn submit(&self, submission: &Submission) -> Result<Acknowledgment, SubmissionError>;
}

/// What the page should show after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub celebrate: bool,
}

pub const INCOMPLETE_MESSAGE: &str = "Please complete all parts of the activity before submitting.";

impl Outcome {
    #[must_use]
    pub fn completed(result: &ActivityResult, settings: &ActivitySettings) -> Self {
        let percent = result.score_percent();
        Self {
            success: true,
            score_percent: Some(percent),
            message: Some(result.band().message().to_owned()),
            celebrate: settings.celebrates(percent),
        }
    }

    #[must_use]
    pub fn incomplete() -> Self {
        Self {
            success: false,
            score_percent: None,
            message: Some(INCOMPLETE_MESSAGE.to_owned()),
            celebrate: false,
        }
    }

    #[must_use]
    pub fn failed(reason: &str) -> Self {
        Self {
            success: false,
            score_percent: None,
            message: Some(format!(
                "We couldn't save your answers ({reason}). Please try again."
            )),
            celebrate: false,
        }
    }
}

/// Renders feedback for an outcome. Called synchronously; nothing is returned.
pub trait FeedbackPresenter: Send + Sync {
    fn present(&self, outcome: &Outcome);
}

/// Presenter that only writes outcomes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresenter;

impl FeedbackPresenter for LogPresenter {
    fn present(&self, outcome: &Outcome) {
        tracing::info!(
            success = outcome.success,
            score_percent = outcome.score_percent,
            celebrate = outcome.celebrate,
            feedback = outcome.message.as_deref().unwrap_or_default(),
            "activity feedback"
        );
    }
}
