#![forbid(unsafe_code)]

pub mod collaborator;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod input;
pub mod memory;

pub use lesson_core::Clock;

pub use collaborator::{
    Acknowledgment, FeedbackPresenter, LogPresenter, Outcome, Submission, SubmissionCollaborator,
};
pub use config::SubmitterConfig;
pub use controller::{
    ActivityContext, ActivityController, ActivityProgress, CommandEffect, SubmitOutcome,
};
pub use error::{ConfigError, ControllerError, SubmissionError};
pub use http::HttpSubmitter;
pub use input::KeyCommand;
pub use memory::RecordingSubmitter;
