use std::collections::BTreeMap;

use super::state::StepState;
use crate::model::{ActivityResult, AnswerValue};

/// Decides whether the answer given for a step counts as correct.
pub trait Scorer {
    fn is_correct(&self, step: usize, answer: &AnswerValue) -> bool;
}

/// Any `Fn(step, answer) -> bool` works as a structural predicate.
impl<F> Scorer for F
where
    F: Fn(usize, &AnswerValue) -> bool,
{
    fn is_correct(&self, step: usize, answer: &AnswerValue) -> bool {
        self(step, answer)
    }
}

/// Expected answer per step. Steps missing from the key never score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    expected: BTreeMap<usize, AnswerValue>,
}

impl AnswerKey {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, step: usize, expected: AnswerValue) -> Self {
        self.expected.insert(step, expected);
        self
    }

    #[must_use]
    pub fn expected(&self, step: usize) -> Option<&AnswerValue> {
        self.expected.get(&step)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }
}

impl FromIterator<(usize, AnswerValue)> for AnswerKey {
    fn from_iter<I: IntoIterator<Item = (usize, AnswerValue)>>(iter: I) -> Self {
        Self {
            expected: iter.into_iter().collect(),
        }
    }
}

impl Scorer for AnswerKey {
    fn is_correct(&self, step: usize, answer: &AnswerValue) -> bool {
        self.expected
            .get(&step)
            .is_some_and(|expected| answer.matches(expected))
    }
}

/// Count correct answers and derive the percentage over all steps.
#[must_use]
pub fn score(state: &StepState, scorer: &dyn Scorer) -> ActivityResult {
    let correct = state
        .answers()
        .iter()
        .filter(|(step, answer)| scorer.is_correct(**step, answer))
        .count();
    ActivityResult::new(correct, state.total_steps())
}
