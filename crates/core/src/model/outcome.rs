use serde::{Deserialize, Serialize};

/// Score of a submitted activity. Derived from the step answers, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityResult {
    correct_count: usize,
    total_steps: usize,
    score_percent: u8,
}

impl ActivityResult {
    /// Clamps `correct_count` to `total_steps`; an empty activity scores 0.
    #[must_use]
    pub fn new(correct_count: usize, total_steps: usize) -> Self {
        let correct_count = correct_count.min(total_steps);
        Self {
            correct_count,
            total_steps,
            score_percent: score_percent(correct_count, total_steps),
        }
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    #[must_use]
    pub fn score_percent(&self) -> u8 {
        self.score_percent
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total_steps > 0 && self.correct_count == self.total_steps
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_percent(self.score_percent)
    }
}

/// `round(100 * correct / total)`, half rounded up, in integer arithmetic.
#[must_use]
pub fn score_percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u128;
    let total = total as u128;
    let rounded = (200 * correct + total) / (2 * total);
    // correct <= total keeps this within 0..=100
    u8::try_from(rounded).unwrap_or(100)
}

/// Feedback tier for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Perfect,
    Great,
    Good,
    NotBad,
    KeepLearning,
}

impl ScoreBand {
    #[must_use]
    pub fn for_percent(percent: u8) -> Self {
        match percent {
            100.. => ScoreBand::Perfect,
            80..=99 => ScoreBand::Great,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::NotBad,
            _ => ScoreBand::KeepLearning,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Perfect => "Perfect! You got everything right!",
            ScoreBand::Great => "Great job! You have a solid understanding!",
            ScoreBand::Good => "Good work! Keep studying to improve!",
            ScoreBand::NotBad => "Not bad! Review the material and try again!",
            ScoreBand::KeepLearning => "Keep learning! Practice makes perfect!",
        }
    }
}
