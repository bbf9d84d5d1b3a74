//! Linear step activities: state, navigation, answers, scoring and the
//! completion gate that guards submission.

mod gate;
mod navigator;
mod ordering;
mod recorder;
mod scoring;
mod state;
mod topics;

pub use gate::{CompletionGate, FailedAttempt, GateError, GatePhase, SubmitTicket};
pub use ordering::{OrderingBoard, OrderingError};
pub use scoring::{AnswerKey, Scorer, score};
pub use state::{StepError, StepState};
pub use topics::{TopicError, TopicTracker};
