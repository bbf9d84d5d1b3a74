use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::AnswerValue;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepError {
    #[error("an activity needs at least one step")]
    Empty,
    #[error("step {step} is out of range for {total} steps")]
    OutOfRange { step: usize, total: usize },
}

/// Position and answers of one linear activity.
///
/// `current_index` always stays in `0..total_steps`; `total_steps` is fixed
/// at construction. Navigation lives in `navigator.rs`, answer bookkeeping in
/// `recorder.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepState {
    pub(super) current_index: usize,
    pub(super) total_steps: usize,
    pub(super) answers: BTreeMap<usize, AnswerValue>,
}

impl StepState {
    /// # Errors
    ///
    /// Returns `StepError::Empty` when `total_steps` is zero.
    pub fn new(total_steps: usize) -> Result<Self, StepError> {
        if total_steps == 0 {
            return Err(StepError::Empty);
        }
        Ok(Self {
            current_index: 0,
            total_steps,
            answers: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<usize, AnswerValue> {
        &self.answers
    }

    pub(super) fn check_step(&self, step: usize) -> Result<(), StepError> {
        if step >= self.total_steps {
            return Err(StepError::OutOfRange {
                step,
                total: self.total_steps,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_steps_is_rejected() {
        assert_eq!(StepState::new(0), Err(StepError::Empty));
    }

    #[test]
    fn starts_at_first_step_without_answers() {
        let state = StepState::new(4).unwrap();
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.total_steps(), 4);
        assert!(state.answers().is_empty());
    }
}
