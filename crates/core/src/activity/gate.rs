use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scoring::{Scorer, score};
use super::state::StepState;
use crate::model::{ActivityResult, AnswerValue};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GateError {
    #[error("activity is incomplete, {} step(s) unanswered", .missing.len())]
    Incomplete { missing: Vec<usize> },
    #[error("a submission is already in flight")]
    InFlight,
    #[error("activity already completed")]
    AlreadyCompleted,
    #[error("submit ticket {attempt} does not match the in-flight submission")]
    StaleTicket { attempt: u32 },
}

/// Lifecycle of a submission.
///
/// `InProgress -> Submitting -> Completed`, or
/// `InProgress -> Submitting -> Failed -> InProgress` when the collaborator
/// rejects. `Failed` is passed through immediately and only shows up in
/// [`CompletionGate::history`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePhase {
    InProgress,
    Submitting,
    Completed,
    Failed,
}

/// Proof that the gate entered `Submitting`; must be handed back to
/// [`CompletionGate::resolve`] or [`CompletionGate::reject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    attempt: u32,
    result: ActivityResult,
    answers: BTreeMap<usize, AnswerValue>,
}

impl SubmitTicket {
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn result(&self) -> &ActivityResult {
        &self.result
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<usize, AnswerValue> {
        &self.answers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub attempt: u32,
    pub reason: String,
}

/// Guards the single terminal submission of an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionGate {
    phase: GatePhase,
    attempts: u32,
    result: Option<ActivityResult>,
    last_failure: Option<FailedAttempt>,
    history: Vec<GatePhase>,
}

impl Default for CompletionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: GatePhase::InProgress,
            attempts: 0,
            result: None,
            last_failure: None,
            history: vec![GatePhase::InProgress],
        }
    }

    #[must_use]
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// True while answers must not change: in flight or completed.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, GatePhase::Submitting | GatePhase::Completed)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == GatePhase::Completed
    }

    #[must_use]
    pub fn can_submit(&self, state: &StepState) -> bool {
        self.phase == GatePhase::InProgress && state.is_complete()
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The frozen result, once completed.
    #[must_use]
    pub fn result(&self) -> Option<&ActivityResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn last_failure(&self) -> Option<&FailedAttempt> {
        self.last_failure.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &[GatePhase] {
        &self.history
    }

    /// Score the answers and enter `Submitting`.
    ///
    /// # Errors
    ///
    /// - `GateError::Incomplete` if any step is unanswered; the gate stays `InProgress`.
    /// - `GateError::InFlight` while another submission is pending.
    /// - `GateError::AlreadyCompleted` after completion.
    pub fn begin_submit(
        &mut self,
        state: &StepState,
        scorer: &dyn Scorer,
    ) -> Result<SubmitTicket, GateError> {
        match self.phase {
            GatePhase::Submitting => return Err(GateError::InFlight),
            GatePhase::Completed => return Err(GateError::AlreadyCompleted),
            GatePhase::InProgress | GatePhase::Failed => {}
        }
        if !state.is_complete() {
            return Err(GateError::Incomplete {
                missing: state.missing_steps(),
            });
        }

        self.attempts += 1;
        self.enter(GatePhase::Submitting);
        Ok(SubmitTicket {
            attempt: self.attempts,
            result: score(state, scorer),
            answers: state.answers().clone(),
        })
    }

    /// The collaborator acknowledged: freeze the result and finish.
    ///
    /// # Errors
    ///
    /// Returns `GateError::StaleTicket` if `ticket` is not the in-flight submission.
    pub fn resolve(&mut self, ticket: SubmitTicket) -> Result<ActivityResult, GateError> {
        self.check_ticket(&ticket)?;
        self.result = Some(ticket.result);
        self.enter(GatePhase::Completed);
        Ok(ticket.result)
    }

    /// The collaborator failed: record why and reopen submission.
    ///
    /// # Errors
    ///
    /// Returns `GateError::StaleTicket` if `ticket` is not the in-flight submission.
    pub fn reject(
        &mut self,
        ticket: SubmitTicket,
        reason: impl Into<String>,
    ) -> Result<FailedAttempt, GateError> {
        self.check_ticket(&ticket)?;
        let failure = FailedAttempt {
            attempt: ticket.attempt,
            reason: reason.into(),
        };
        self.enter(GatePhase::Failed);
        self.enter(GatePhase::InProgress);
        self.last_failure = Some(failure.clone());
        Ok(failure)
    }

    fn check_ticket(&self, ticket: &SubmitTicket) -> Result<(), GateError> {
        if self.phase != GatePhase::Submitting || ticket.attempt != self.attempts {
            return Err(GateError::StaleTicket {
                attempt: ticket.attempt,
            });
        }
        Ok(())
    }

    fn enter(&mut self, phase: GatePhase) {
        self.phase = phase;
        self.history.push(phase);
    }
}
