use services::{FeedbackPresenter, KeyCommand, LogPresenter, Outcome};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Key(KeyCommand),
    Open(String),
    Help,
    Quit,
}

/// Words and single letters stand in for the keys of the web pages.
#[must_use]
pub fn parse_line(line: &str) -> Option<LineCommand> {
    let line = line.trim();
    if let Some(topic) = line.strip_prefix("open ") {
        let topic = topic.trim();
        return (!topic.is_empty()).then(|| LineCommand::Open(topic.to_owned()));
    }
    let key = match line.to_ascii_lowercase().as_str() {
        "p" | "prev" | "left" => "ArrowLeft",
        "n" | "next" | "right" => "ArrowRight",
        "s" | "submit" => "Enter",
        "r" | "restart" => return Some(LineCommand::Key(KeyCommand::Restart)),
        "h" | "help" | "?" => return Some(LineCommand::Help),
        "q" | "quit" | "exit" => return Some(LineCommand::Quit),
        _ => line,
    };
    KeyCommand::from_key(key).map(LineCommand::Key)
}

pub const HELP: &str = "\
commands:
  1-9            choose an option / place a card
  n, next        next step
  p, prev        previous step
  open <topic>   open a topic card
  s, submit      submit your answers
  r, restart     clear answers and start over
  q, quit        leave the activity";

/// Prints feedback the way the result modal would show it. The outcome is
/// also logged, so it shows up in stderr captures of a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPresenter {
    log: LogPresenter,
}

impl FeedbackPresenter for TerminalPresenter {
    fn present(&self, outcome: &Outcome) {
        self.log.present(outcome);
        println!("{}", render_outcome(outcome));
    }
}

#[must_use]
pub fn render_outcome(outcome: &Outcome) -> String {
    let title = if outcome.success {
        "Activity Complete!"
    } else {
        "Not yet"
    };
    let mut out = format!("== {title} ==");
    if let Some(score) = outcome.score_percent {
        out.push_str(&format!("\nYour score: {score}%"));
    }
    if let Some(message) = &outcome.message {
        out.push('\n');
        out.push_str(message);
    }
    if outcome.celebrate {
        out.push_str("\n*** Well done! ***");
    }
    out
}
