use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::collaborator::{Acknowledgment, Submission, SubmissionCollaborator};
use crate::config::SubmitterConfig;
use crate::error::SubmissionError;

/// Posts submissions as JSON to the lesson server.
#[derive(Clone, Debug)]
pub struct HttpSubmitter {
    client: Client,
    config: SubmitterConfig,
}

impl HttpSubmitter {
    /// # Errors
    ///
    /// Returns `SubmissionError::Http` if the HTTP client cannot be built.
    pub fn new(config: SubmitterConfig) -> Result<Self, SubmissionError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }
}

#[async_trait]
impl SubmissionCollaborator for HttpSubmitter {
    async fn submit(&self, submission: &Submission) -> Result<Acknowledgment, SubmissionError> {
        let url = self.config.url();
        tracing::debug!(%url, activity_id = %submission.activity_id, "posting submission");

        let response = self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .json(submission)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SubmissionError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        interpret_body(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ServerVerdict {
    success: Option<bool>,
    message: Option<String>,
    error: Option<String>,
}

/// A JSON body with `"success": false` is a rejection; anything else,
/// including an empty or non-JSON body, is an acknowledgment.
fn interpret_body(body: &[u8]) -> Result<Acknowledgment, SubmissionError> {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        tracing::debug!("submission response was not JSON");
        return Ok(Acknowledgment::empty());
    };

    if let Ok(verdict) = ServerVerdict::deserialize(&value) {
        if verdict.success == Some(false) {
            let reason = verdict
                .error
                .or(verdict.message)
                .unwrap_or_else(|| "server refused the submission".into());
            return Err(SubmissionError::Rejected(reason));
        }
    }

    Ok(Acknowledgment::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_json_body_is_an_empty_acknowledgment() {
        let ack = interpret_body(b"<html>ok</html>").unwrap();
        assert!(ack.is_empty());
    }

    #[test]
    fn json_body_is_kept() {
        let ack = interpret_body(br#"{"success": true, "redirect": "/menu"}"#).unwrap();
        assert_eq!(ack.value()["redirect"], "/menu");
    }

    #[test]
    fn explicit_failure_is_a_rejection() {
        let err = interpret_body(br#"{"success": false, "error": "not logged in"}"#).unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(reason) if reason == "not logged in"));
    }

    #[test]
    fn builds_from_default_config() {
        let submitter = HttpSubmitter::new(SubmitterConfig::default()).unwrap();
        assert!(submitter.config().url().ends_with("/record_activity_completion"));
    }
}
