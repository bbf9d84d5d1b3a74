use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::collaborator::{Acknowledgment, Submission, SubmissionCollaborator};
use crate::error::SubmissionError;

/// In-memory collaborator: keeps every accepted submission and can be told
/// to reject upcoming calls.
#[derive(Clone, Debug, Default)]
pub struct RecordingSubmitter {
    accepted: Arc<Mutex<Vec<Submission>>>,
    scripted_failures: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<usize>>,
}

impl RecordingSubmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the next call with `reason`. Repeated calls queue more rejections.
    #[must_use]
    pub fn failing_next(self, reason: impl Into<String>) -> Self {
        if let Ok(mut queue) = self.scripted_failures.lock() {
            queue.push_back(reason.into());
        }
        self
    }

    #[must_use]
    pub fn accepted(&self) -> Vec<Submission> {
        self.accepted
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Every call, accepted or rejected.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.lock().map(|guard| *guard).unwrap_or_default()
    }
}

#[async_trait]
impl SubmissionCollaborator for RecordingSubmitter {
    async fn submit(&self, submission: &Submission) -> Result<Acknowledgment, SubmissionError> {
        {
            let mut calls = self
                .calls
                .lock()
                .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
            *calls += 1;
        }

        let failure = self
            .scripted_failures
            .lock()
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?
            .pop_front();
        if let Some(reason) = failure {
            return Err(SubmissionError::Rejected(reason));
        }

        let mut accepted = self
            .accepted
            .lock()
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
        accepted.push(submission.clone());
        Ok(Acknowledgment::new(serde_json::json!({
            "success": true,
            "received": accepted.len(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::{ActivityId, AnswerValue};
    use lesson_core::time::fixed_now;
    use std::collections::BTreeMap;

    fn submission() -> Submission {
        Submission {
            activity_id: ActivityId::new("memory-test").unwrap(),
            module_id: None,
            quiz_type: None,
            answers: BTreeMap::from([(0, AnswerValue::Choice(1))]),
            score_percent: 100,
            correct_count: 1,
            total_steps: 1,
            completed_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn scripted_failures_come_first_then_calls_succeed() {
        let submitter = RecordingSubmitter::new()
            .failing_next("offline")
            .failing_next("still offline");

        for expected in ["offline", "still offline"] {
            match submitter.submit(&submission()).await {
                Err(SubmissionError::Rejected(reason)) => assert_eq!(reason, expected),
                other => panic!("expected rejection, got {other:?}"),
            }
        }
        let ack = submitter.submit(&submission()).await.unwrap();
        assert_eq!(ack.value()["received"], 1);
        assert_eq!(submitter.calls(), 3);
        assert_eq!(submitter.accepted(), vec![submission()]);
    }

    #[tokio::test]
    async fn clones_share_the_same_log() {
        let submitter = RecordingSubmitter::new();
        let handle = submitter.clone();
        submitter.submit(&submission()).await.unwrap();
        assert_eq!(handle.calls(), 1);
        assert_eq!(handle.accepted().len(), 1);
    }
}
