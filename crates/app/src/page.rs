use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use lesson_core::activity::{OrderingBoard, TopicTracker};
use lesson_core::model::{ActivityId, QuizDefinition, SettingsOverrides};
use serde::Deserialize;
use services::{ActivityContext, ActivityController, SubmissionCollaborator};

/// Activity file as exported from the lesson data scripts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Page {
    Quiz {
        activity_id: ActivityId,
        quiz: QuizDefinition,
    },
    Ordering {
        activity_id: ActivityId,
        title: String,
        /// Labels shown on the draggable cards, token `i` is `labels[i]`.
        labels: Vec<String>,
        correct_order: Vec<usize>,
    },
    Topics {
        activity_id: ActivityId,
        title: String,
        topics: Vec<String>,
    },
}

impl Page {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading activity file {}", path.display()))?;
        let page: Page = serde_json::from_str(&raw)
            .with_context(|| format!("parsing activity file {}", path.display()))?;
        if let Page::Ordering { labels, .. } = &page {
            if labels.is_empty() {
                bail!("ordering activity needs at least one card");
            }
        }
        Ok(page)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Page::Quiz { quiz, .. } => &quiz.title,
            Page::Ordering { title, .. } | Page::Topics { title, .. } => title,
        }
    }

    /// Build the controller for this page. `overrides` are laid over the
    /// page's own defaults, so quizzes keep answer gating unless it is
    /// switched off explicitly.
    pub fn controller(
        &self,
        overrides: &SettingsOverrides,
        submitter: Arc<dyn SubmissionCollaborator>,
    ) -> Result<ActivityController> {
        let controller = match self {
            Page::Quiz { activity_id, quiz } => {
                ActivityController::for_quiz(activity_id.clone(), quiz, submitter)?
            }
            Page::Ordering {
                activity_id,
                labels,
                correct_order,
                ..
            } => {
                let board = OrderingBoard::new(0..labels.len())?;
                ActivityController::for_ordering(
                    ActivityContext::new(activity_id.clone()),
                    board,
                    correct_order,
                    submitter,
                )?
            }
            Page::Topics {
                activity_id,
                topics,
                ..
            } => ActivityController::for_topics(
                ActivityContext::new(activity_id.clone()),
                TopicTracker::new(topics.iter().cloned())?,
                submitter,
            )?,
        };
        let settings = overrides.apply(controller.settings());
        Ok(controller.with_settings(settings)?)
    }

    /// Text for the current step.
    #[must_use]
    pub fn render(&self, controller: &ActivityController) -> String {
        let progress = controller.progress();
        let mut out = format!("{}  [{}]\n", self.title(), progress.label);
        match self {
            Page::Quiz { quiz, .. } => {
                if let Some(question) = quiz.question(progress.current_index) {
                    let chosen = controller
                        .state()
                        .current_answer()
                        .and_then(|answer| answer.choice());
                    out.push_str(&format!("Question {}: {}\n", progress.current_index + 1, question.prompt));
                    for (index, option) in question.options.iter().enumerate() {
                        let marker = if chosen == Some(index) { '*' } else { ' ' };
                        out.push_str(&format!(" {marker} {}. {option}\n", index + 1));
                    }
                }
            }
            Page::Ordering { labels, .. } => {
                if let Some(board) = controller.board() {
                    let placed = board.placed(controller.state());
                    out.push_str("Your order:\n");
                    for (slot, token) in placed.iter().enumerate() {
                        out.push_str(&format!("   {}. {}\n", slot + 1, label(labels, *token)));
                    }
                    out.push_str("Cards left:\n");
                    for token in board.remaining(controller.state()) {
                        out.push_str(&format!("   [{}] {}\n", token + 1, label(labels, token)));
                    }
                }
            }
            Page::Topics { .. } => {
                if let Some(tracker) = controller.topics() {
                    out.push_str(&format!("{}\n", tracker.progress_label()));
                    for topic in tracker.topics() {
                        let mark = if tracker.is_read(topic) { 'x' } else { ' ' };
                        out.push_str(&format!(" [{mark}] {topic}\n"));
                    }
                }
            }
        }
        out
    }
}

fn label(labels: &[String], token: usize) -> &str {
    labels.get(token).map_or("?", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::RecordingSubmitter;
    use std::io::Write;

    const QUIZ: &str = r#"{
        "type": "quiz",
        "activity_id": "module-1-pre",
        "quiz": {
            "title": "Puberty basics",
            "module_id": 1,
            "kind": "pre",
            "questions": [
                {"q": "What is puberty?", "a": ["A period of growth", "A holiday"], "correct": 0}
            ]
        }
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_quiz_page_and_renders_question() {
        let file = write_temp(QUIZ);
        let page = Page::load(file.path()).unwrap();
        assert_eq!(page.title(), "Puberty basics");

        let controller = page
            .controller(&SettingsOverrides::default(), Arc::new(RecordingSubmitter::new()))
            .unwrap();
        assert!(controller.settings().require_answer_to_advance);
        let text = page.render(&controller);
        assert!(text.contains("Question 1: What is puberty?"));
        assert!(text.contains("1. A period of growth"));
    }

    #[test]
    fn config_overrides_keep_quiz_gating() {
        let file = write_temp(QUIZ);
        let page = Page::load(file.path()).unwrap();
        let overrides = SettingsOverrides {
            celebrate_threshold: Some(80),
            ..SettingsOverrides::default()
        };
        let controller = page
            .controller(&overrides, Arc::new(RecordingSubmitter::new()))
            .unwrap();
        assert!(controller.settings().require_answer_to_advance);
        assert_eq!(controller.settings().celebrate_threshold, 80);

        let invalid = SettingsOverrides {
            celebrate_threshold: Some(120),
            ..SettingsOverrides::default()
        };
        assert!(page
            .controller(&invalid, Arc::new(RecordingSubmitter::new()))
            .is_err());
    }

    #[test]
    fn ordering_page_rejects_bad_expected_order() {
        let page = Page::Ordering {
            activity_id: ActivityId::new("handwashing-order").unwrap(),
            title: "Handwashing".into(),
            labels: vec!["Apply Soap".into(), "Wet Hands".into()],
            correct_order: vec![1, 1],
        };
        assert!(page
            .controller(&SettingsOverrides::default(), Arc::new(RecordingSubmitter::new()))
            .is_err());
    }

    #[test]
    fn topics_page_lists_topics() {
        let page = Page::Topics {
            activity_id: ActivityId::new("adolescent-health").unwrap(),
            title: "Adolescent health".into(),
            topics: vec!["sleep".into(), "nutrition".into()],
        };
        let controller = page
            .controller(&SettingsOverrides::default(), Arc::new(RecordingSubmitter::new()))
            .unwrap();
        let text = page.render(&controller);
        assert!(text.contains("0 of 2 topics explored"));
        assert!(text.contains("[ ] sleep"));
    }

    #[test]
    fn bundled_demos_build_controllers() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        for name in [
            "hygiene_post_quiz.json",
            "handwashing_order.json",
            "adolescent_topics.json",
        ] {
            let page = Page::load(&dir.join(name)).unwrap();
            page.controller(&SettingsOverrides::default(), Arc::new(RecordingSubmitter::new()))
                .unwrap_or_else(|err| panic!("{name}: {err:#}"));
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Page::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("reading activity file"));
    }
}
