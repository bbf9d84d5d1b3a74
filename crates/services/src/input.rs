/// Player input, independent of where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Previous,
    Next,
    /// Zero-based option on the current step.
    SelectOption(usize),
    Submit,
    Restart,
}

impl KeyCommand {
    /// Map a DOM-style key name. Digits `1`-`9` pick options 0-8.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Previous),
            "ArrowRight" => Some(Self::Next),
            "Enter" => Some(Self::Submit),
            _ => {
                let mut chars = key.chars();
                let digit = chars.next()?.to_digit(10)?;
                if chars.next().is_some() || digit == 0 {
                    return None;
                }
                usize::try_from(digit - 1).ok().map(Self::SelectOption)
            }
        }
    }
}
