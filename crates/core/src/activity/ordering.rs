use std::collections::BTreeSet;

use thiserror::Error;

use super::scoring::AnswerKey;
use super::state::{StepError, StepState};
use crate::model::AnswerValue;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderingError {
    #[error("an ordering board needs at least one token")]
    Empty,
    #[error("token {token} appears more than once")]
    DuplicateToken { token: usize },
    #[error("token {token} is not on this board")]
    UnknownToken { token: usize },
    #[error("token {token} is already placed in slot {slot}")]
    AlreadyPlaced { token: usize, slot: usize },
    #[error("every slot is already filled")]
    Full,
    #[error("board has {expected} slots but the activity has {actual} steps")]
    SlotMismatch { expected: usize, actual: usize },
    #[error("expected order must use every token exactly once")]
    NotAPermutation,
    #[error(transparent)]
    Step(#[from] StepError),
}

/// Drag-and-drop ordering: tokens are dropped one by one into the next free
/// slot, and slot `i` of the step state holds the token placed there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingBoard {
    tokens: Vec<usize>,
}

impl OrderingBoard {
    /// # Errors
    ///
    /// Returns `OrderingError::Empty` or `OrderingError::DuplicateToken`.
    pub fn new(tokens: impl IntoIterator<Item = usize>) -> Result<Self, OrderingError> {
        let tokens: Vec<usize> = tokens.into_iter().collect();
        if tokens.is_empty() {
            return Err(OrderingError::Empty);
        }
        let mut seen = BTreeSet::new();
        for token in &tokens {
            if !seen.insert(*token) {
                return Err(OrderingError::DuplicateToken { token: *token });
            }
        }
        Ok(Self { tokens })
    }

    #[must_use]
    pub fn tokens(&self) -> &[usize] {
        &self.tokens
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.tokens.len()
    }

    /// A fresh step state with one step per slot.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed board; the `Result` mirrors `StepState::new`.
    pub fn new_state(&self) -> Result<StepState, OrderingError> {
        Ok(StepState::new(self.slot_count())?)
    }

    /// Drop `token` into the first empty slot and return that slot.
    ///
    /// # Errors
    ///
    /// Returns `UnknownToken`, `AlreadyPlaced`, `Full` or `SlotMismatch`.
    pub fn place(&self, state: &mut StepState, token: usize) -> Result<usize, OrderingError> {
        self.check_state(state)?;
        if !self.tokens.contains(&token) {
            return Err(OrderingError::UnknownToken { token });
        }
        if let Some(slot) = slot_of(state, token) {
            return Err(OrderingError::AlreadyPlaced { token, slot });
        }
        let slot = state.first_missing_step().ok_or(OrderingError::Full)?;
        state.record_answer(slot, AnswerValue::Choice(token))?;
        Ok(slot)
    }

    /// Tokens in slot order, stopping at the first empty slot.
    #[must_use]
    pub fn placed(&self, state: &StepState) -> Vec<usize> {
        (0..state.total_steps())
            .map_while(|slot| state.answer(slot).and_then(AnswerValue::choice))
            .collect()
    }

    /// Tokens still waiting to be placed, in board order.
    #[must_use]
    pub fn remaining(&self, state: &StepState) -> Vec<usize> {
        self.tokens
            .iter()
            .copied()
            .filter(|token| slot_of(state, *token).is_none())
            .collect()
    }

    /// Answer key that expects `order[i]` in slot `i`.
    ///
    /// # Errors
    ///
    /// Returns `OrderingError::NotAPermutation` unless `order` uses every token once.
    pub fn expected_key(&self, order: &[usize]) -> Result<AnswerKey, OrderingError> {
        let wanted: BTreeSet<usize> = order.iter().copied().collect();
        let have: BTreeSet<usize> = self.tokens.iter().copied().collect();
        if order.len() != self.tokens.len() || wanted != have {
            return Err(OrderingError::NotAPermutation);
        }
        Ok(order
            .iter()
            .enumerate()
            .map(|(slot, token)| (slot, AnswerValue::Choice(*token)))
            .collect())
    }

    /// True when every slot holds exactly the expected token.
    #[must_use]
    pub fn is_in_order(&self, state: &StepState, order: &[usize]) -> bool {
        self.placed(state) == order
    }

    fn check_state(&self, state: &StepState) -> Result<(), OrderingError> {
        if state.total_steps() != self.slot_count() {
            return Err(OrderingError::SlotMismatch {
                expected: self.slot_count(),
                actual: state.total_steps(),
            });
        }
        Ok(())
    }
}

fn slot_of(state: &StepState, token: usize) -> Option<usize> {
    state
        .answers()
        .iter()
        .find(|(_, answer)| answer.choice() == Some(token))
        .map(|(slot, _)| *slot)
}
