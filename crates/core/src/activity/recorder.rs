use super::state::{StepError, StepState};
use crate::model::AnswerValue;

impl StepState {
    /// Record `value` for `step`, replacing and returning any earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `StepError::OutOfRange` if `step` is not a step of this activity.
    pub fn record_answer(
        &mut self,
        step: usize,
        value: AnswerValue,
    ) -> Result<Option<AnswerValue>, StepError> {
        self.check_step(step)?;
        Ok(self.answers.insert(step, value))
    }

    #[must_use]
    pub fn answer(&self, step: usize) -> Option<&AnswerValue> {
        self.answers.get(&step)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&AnswerValue> {
        self.answer(self.current_index)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// True once every step in `0..total_steps` has an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        // keys are always < total_steps, so a full map means every step is covered
        self.answers.len() == self.total_steps
    }

    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.is_complete()
    }

    /// Unanswered step indices in ascending order.
    #[must_use]
    pub fn missing_steps(&self) -> Vec<usize> {
        (0..self.total_steps)
            .filter(|step| !self.answers.contains_key(step))
            .collect()
    }

    #[must_use]
    pub fn first_missing_step(&self) -> Option<usize> {
        (0..self.total_steps).find(|step| !self.answers.contains_key(step))
    }

    /// Forget every answer and return to the first step.
    pub fn clear_answers(&mut self) {
        self.answers.clear();
        self.current_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_only_when_every_step_answered() {
        let mut state = StepState::new(3).unwrap();
        state.record_answer(0, AnswerValue::Choice(1)).unwrap();
        state.record_answer(2, AnswerValue::Choice(0)).unwrap();
        assert!(!state.is_complete());
        assert_eq!(state.missing_steps(), vec![1]);

        state.record_answer(1, AnswerValue::Choice(3)).unwrap();
        assert!(state.is_complete());
        assert!(state.missing_steps().is_empty());
    }

    #[test]
    fn overwriting_keeps_completion() {
        let mut state = StepState::new(2).unwrap();
        state.record_answer(0, AnswerValue::Choice(0)).unwrap();
        state.record_answer(1, AnswerValue::Choice(0)).unwrap();
        assert!(state.all_answered());

        let previous = state.record_answer(1, AnswerValue::Choice(2)).unwrap();
        assert_eq!(previous, Some(AnswerValue::Choice(0)));
        assert!(state.is_complete());
        assert_eq!(state.answer(1), Some(&AnswerValue::Choice(2)));
        assert_eq!(state.answered_count(), 2);
    }

    #[test]
    fn out_of_range_step_is_rejected() {
        let mut state = StepState::new(2).unwrap();
        let err = state.record_answer(2, AnswerValue::Choice(0)).unwrap_err();
        assert_eq!(err, StepError::OutOfRange { step: 2, total: 2 });
        assert!(state.answers().is_empty());
    }

    #[test]
    fn clear_resets_answers_and_position() {
        let mut state = StepState::new(3).unwrap();
        state.record_answer(0, AnswerValue::Text("soap".into())).unwrap();
        state.advance();
        state.advance();
        state.clear_answers();
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.first_missing_step(), Some(0));
        assert!(state.current_answer().is_none());
    }
}
