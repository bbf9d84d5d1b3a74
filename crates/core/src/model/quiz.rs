use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::AnswerKey;
use crate::model::{AnswerValue, ModuleId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    NoQuestions,
    #[error("question {question} has an empty prompt")]
    EmptyPrompt { question: usize },
    #[error("question {question} needs at least two options, got {options}")]
    TooFewOptions { question: usize, options: usize },
    #[error("question {question} marks option {correct} correct but only has {options}")]
    CorrectOutOfRange {
        question: usize,
        correct: usize,
        options: usize,
    },
}

/// Whether a quiz runs before or after the lesson content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Pre,
    Post,
}

impl QuizKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizKind::Pre => "pre",
            QuizKind::Post => "post",
        }
    }
}

/// One multiple-choice question. Accepts the compact `q`/`a` field names
/// used by the lesson data exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "q")]
    pub prompt: String,
    #[serde(alias = "a")]
    pub options: Vec<String>,
    pub correct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub title: String,
    pub module_id: ModuleId,
    pub kind: QuizKind,
    pub questions: Vec<Question>,
}

impl QuizDefinition {
    /// Check that every question can actually be answered and scored.
    ///
    /// # Errors
    ///
    /// Returns the first `QuizError` found, in question order.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        for (question, q) in self.questions.iter().enumerate() {
            if q.prompt.trim().is_empty() {
                return Err(QuizError::EmptyPrompt { question });
            }
            let options = q.options.len();
            if options < 2 {
                return Err(QuizError::TooFewOptions { question, options });
            }
            if q.correct >= options {
                return Err(QuizError::CorrectOutOfRange {
                    question,
                    correct: q.correct,
                    options,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn question(&self, step: usize) -> Option<&Question> {
        self.questions.get(step)
    }

    #[must_use]
    pub fn answer_key(&self) -> AnswerKey {
        self.questions
            .iter()
            .enumerate()
            .map(|(step, q)| (step, AnswerValue::Choice(q.correct)))
            .collect()
    }
}
