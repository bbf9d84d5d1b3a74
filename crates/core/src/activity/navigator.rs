use super::state::StepState;

impl StepState {
    /// Move to the next step. Returns `false` (and does nothing) on the last step.
    pub fn advance(&mut self) -> bool {
        if self.current_index + 1 < self.total_steps {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous step. Returns `false` (and does nothing) on the first step.
    pub fn retreat(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `index`, clamped to the last step. Returns the index landed on.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.current_index = index.min(self.total_steps - 1);
        self.current_index
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.total_steps
    }

    /// `100 * (current_index + 1) / total_steps`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        100.0 * (self.current_index + 1) as f64 / self.total_steps as f64
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.current_index + 1, self.total_steps)
    }
}
