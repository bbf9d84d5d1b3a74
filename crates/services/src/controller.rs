use std::fmt;
use std::sync::Arc;

use lesson_core::Clock;
use lesson_core::activity::{
    CompletionGate, GateError, GatePhase, OrderingBoard, Scorer, StepState, TopicTracker,
};
use lesson_core::model::{
    ActivityId, ActivityResult, ActivitySettings, AnswerValue, ModuleId, QuizDefinition, QuizKind,
};
use tracing::{debug, error, info, warn};

use crate::collaborator::{
    Acknowledgment, FeedbackPresenter, Outcome, Submission, SubmissionCollaborator,
};
use crate::error::ControllerError;
use crate::input::KeyCommand;

//
// ─── CONTEXT & VIEWS ───────────────────────────────────────────────────────────
//

/// Identifies the page an activity belongs to; copied into every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityContext {
    pub activity_id: ActivityId,
    pub module_id: Option<ModuleId>,
    pub quiz_kind: Option<QuizKind>,
}

impl ActivityContext {
    #[must_use]
    pub fn new(activity_id: ActivityId) -> Self {
        Self {
            activity_id,
            module_id: None,
            quiz_kind: None,
        }
    }

    #[must_use]
    pub fn with_module(mut self, module_id: ModuleId) -> Self {
        self.module_id = Some(module_id);
        self
    }

    #[must_use]
    pub fn with_quiz_kind(mut self, kind: QuizKind) -> Self {
        self.quiz_kind = Some(kind);
        self
    }
}

/// Snapshot of navigation and completion, for progress bars and buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityProgress {
    pub current_index: usize,
    pub total_steps: usize,
    pub answered: usize,
    pub percent: f64,
    pub label: String,
    pub is_first: bool,
    pub is_last: bool,
    pub is_complete: bool,
    pub can_submit: bool,
    pub phase: GatePhase,
}

/// Result of a submit attempt. Never an error: every case is reported to
/// the presenter where one is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed {
        result: ActivityResult,
        acknowledgment: Acknowledgment,
    },
    /// Refused locally; the collaborator was not called.
    Incomplete { missing: Vec<usize> },
    /// The collaborator failed; answers are kept and submit may be retried.
    Failed { attempt: u32, message: String },
    InFlight,
    AlreadyCompleted,
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed { .. })
    }
}

/// What a dispatched `KeyCommand` did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEffect {
    Moved(bool),
    Answered { step: usize, option: usize },
    Placed { slot: usize, token: usize },
    Restarted,
    Submitted(SubmitOutcome),
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

type BoxedScorer = Box<dyn Scorer + Send + Sync>;

/// Owns the state of one activity page from load to navigation away.
///
/// All mutation goes through `&mut self`, so at most one submission can be
/// in flight; the gate's `Submitting` phase also locks answers and
/// navigation until the collaborator answers.
pub struct ActivityController {
    context: ActivityContext,
    settings: ActivitySettings,
    state: StepState,
    gate: CompletionGate,
    scorer: BoxedScorer,
    option_counts: Option<Vec<usize>>,
    board: Option<OrderingBoard>,
    topics: Option<TopicTracker>,
    clock: Clock,
    submitter: Arc<dyn SubmissionCollaborator>,
    presenter: Option<Arc<dyn FeedbackPresenter>>,
}

impl ActivityController {
    #[must_use]
    pub fn new(
        context: ActivityContext,
        state: StepState,
        scorer: impl Scorer + Send + Sync + 'static,
        submitter: Arc<dyn SubmissionCollaborator>,
    ) -> Self {
        Self {
            context,
            settings: ActivitySettings::default(),
            state,
            gate: CompletionGate::new(),
            scorer: Box::new(scorer),
            option_counts: None,
            board: None,
            topics: None,
            clock: Clock::default(),
            submitter,
            presenter: None,
        }
    }

    /// Controller for a multiple-choice quiz, scored against its correct options.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Quiz` if the definition does not validate.
    pub fn for_quiz(
        activity_id: ActivityId,
        quiz: &QuizDefinition,
        submitter: Arc<dyn SubmissionCollaborator>,
    ) -> Result<Self, ControllerError> {
        quiz.validate()?;
        let context = ActivityContext::new(activity_id)
            .with_module(quiz.module_id)
            .with_quiz_kind(quiz.kind);
        let state = StepState::new(quiz.step_count())?;
        let mut controller = Self::new(context, state, quiz.answer_key(), submitter);
        controller.settings = ActivitySettings::quiz();
        controller.option_counts = Some(quiz.questions.iter().map(|q| q.options.len()).collect());
        Ok(controller)
    }

    /// Controller for a drag-and-drop ordering, scored slot by slot against `expected`.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Ordering` if `expected` is not a permutation of the board.
    pub fn for_ordering(
        context: ActivityContext,
        board: OrderingBoard,
        expected: &[usize],
        submitter: Arc<dyn SubmissionCollaborator>,
    ) -> Result<Self, ControllerError> {
        let key = board.expected_key(expected)?;
        let state = board.new_state()?;
        let mut controller = Self::new(context, state, key, submitter);
        controller.board = Some(board);
        Ok(controller)
    }

    /// Controller for a topic exploration page: one step per topic, a step
    /// is answered once its topic card has been opened.
    ///
    /// # Errors
    ///
    /// Propagates `StepError` from building the step state.
    pub fn for_topics(
        context: ActivityContext,
        tracker: TopicTracker,
        submitter: Arc<dyn SubmissionCollaborator>,
    ) -> Result<Self, ControllerError> {
        let state = StepState::new(tracker.total())?;
        let mut controller = Self::new(context, state, topic_opened, submitter);
        controller.topics = Some(tracker);
        Ok(controller)
    }

    /// # Errors
    ///
    /// Returns `ControllerError::Settings` if the settings do not validate.
    pub fn with_settings(mut self, settings: ActivitySettings) -> Result<Self, ControllerError> {
        self.settings = settings.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_presenter(mut self, presenter: Arc<dyn FeedbackPresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn context(&self) -> &ActivityContext {
        &self.context
    }

    #[must_use]
    pub fn settings(&self) -> &ActivitySettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &StepState {
        &self.state
    }

    #[must_use]
    pub fn gate(&self) -> &CompletionGate {
        &self.gate
    }

    #[must_use]
    pub fn phase(&self) -> GatePhase {
        self.gate.phase()
    }

    #[must_use]
    pub fn board(&self) -> Option<&OrderingBoard> {
        self.board.as_ref()
    }

    /// Frozen result after completion.
    #[must_use]
    pub fn result(&self) -> Option<&ActivityResult> {
        self.gate.result()
    }

    #[must_use]
    pub fn topics(&self) -> Option<&TopicTracker> {
        self.topics.as_ref()
    }

    #[must_use]
    pub fn option_count(&self, step: usize) -> Option<usize> {
        self.option_counts
            .as_ref()
            .and_then(|counts| counts.get(step).copied())
    }

    #[must_use]
    pub fn progress(&self) -> ActivityProgress {
        ActivityProgress {
            current_index: self.state.current_index(),
            total_steps: self.state.total_steps(),
            answered: self.state.answered_count(),
            percent: self.state.progress_percent(),
            label: self.state.progress_label(),
            is_first: self.state.is_first(),
            is_last: self.state.is_last(),
            is_complete: self.state.is_complete(),
            can_submit: self.gate.can_submit(&self.state),
            phase: self.gate.phase(),
        }
    }

    //
    // ─── NAVIGATION & ANSWERS ──────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// `Locked` while submitting or after completion; `AnswerRequired` when
    /// the settings demand an answer before moving on.
    pub fn advance(&mut self) -> Result<bool, ControllerError> {
        self.ensure_unlocked()?;
        if self.settings.require_answer_to_advance
            && !self.state.is_last()
            && self.state.current_answer().is_none()
        {
            return Err(ControllerError::AnswerRequired {
                step: self.state.current_index(),
            });
        }
        let moved = self.state.advance();
        debug!(step = self.state.current_index(), moved, "advance");
        Ok(moved)
    }

    /// # Errors
    ///
    /// `Locked` while submitting or after completion.
    pub fn retreat(&mut self) -> Result<bool, ControllerError> {
        self.ensure_unlocked()?;
        let moved = self.state.retreat();
        debug!(step = self.state.current_index(), moved, "retreat");
        Ok(moved)
    }

    /// # Errors
    ///
    /// `Locked` while submitting or after completion.
    pub fn go_to(&mut self, index: usize) -> Result<usize, ControllerError> {
        self.ensure_unlocked()?;
        Ok(self.state.go_to(index))
    }

    /// # Errors
    ///
    /// `Locked` while submitting or after completion; `UnsupportedInput` on
    /// ordering and topic activities; `Step` for an unknown step.
    pub fn record_answer(
        &mut self,
        step: usize,
        value: AnswerValue,
    ) -> Result<Option<AnswerValue>, ControllerError> {
        self.ensure_unlocked()?;
        self.ensure_direct_answers()?;
        let previous = self.state.record_answer(step, value)?;
        debug!(
            step,
            answered = self.state.answered_count(),
            replaced = previous.is_some(),
            "answer recorded"
        );
        Ok(previous)
    }

    /// Choose `option` on the current step.
    ///
    /// # Errors
    ///
    /// `OptionOutOfRange` for quizzes when the question has fewer options,
    /// plus everything `record_answer` returns.
    pub fn select_option(&mut self, option: usize) -> Result<Option<AnswerValue>, ControllerError> {
        let step = self.state.current_index();
        if let Some(options) = self.option_count(step) {
            if option >= options {
                return Err(ControllerError::OptionOutOfRange {
                    step,
                    option,
                    options,
                });
            }
        }
        self.record_answer(step, AnswerValue::Choice(option))
    }

    /// Drop `token` into the next free slot of the ordering board.
    ///
    /// # Errors
    ///
    /// `NotOrdering` without a board, `Locked`, or the board's `OrderingError`.
    pub fn place_token(&mut self, token: usize) -> Result<usize, ControllerError> {
        self.ensure_unlocked()?;
        let board = self.board.as_ref().ok_or(ControllerError::NotOrdering)?;
        let slot = board.place(&mut self.state, token)?;
        debug!(token, slot, "token placed");
        Ok(slot)
    }

    /// Mark a topic card as opened. Returns `true` the first time.
    ///
    /// # Errors
    ///
    /// `NotTopics` without a tracker, `Locked`, or `Topic` for unknown topics.
    pub fn open_topic(&mut self, topic: &str) -> Result<bool, ControllerError> {
        self.ensure_unlocked()?;
        let tracker = self.topics.as_mut().ok_or(ControllerError::NotTopics)?;
        let first_time = tracker.mark_read(topic)?;
        let step = tracker.topics().iter().position(|t| t == topic);
        if let (true, Some(step)) = (first_time, step) {
            self.state
                .record_answer(step, AnswerValue::Text(topic.to_owned()))?;
            debug!(topic, step, label = %tracker.progress_label(), "topic opened");
        }
        Ok(first_time)
    }

    /// Forget all answers and start over from the first step.
    ///
    /// # Errors
    ///
    /// `Locked` while submitting or after completion.
    pub fn restart(&mut self) -> Result<(), ControllerError> {
        self.ensure_unlocked()?;
        self.state.clear_answers();
        if let Some(tracker) = self.topics.as_mut() {
            tracker.reset();
        }
        info!(activity_id = %self.context.activity_id, "activity restarted");
        Ok(())
    }

    //
    // ─── SUBMISSION ────────────────────────────────────────────────────────────
    //

    /// Submit the answers once every step has one.
    ///
    /// Incomplete activities are refused without calling the collaborator.
    /// A collaborator failure reopens the gate so the same answers can be
    /// submitted again; there is no automatic retry.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let ticket = match self.gate.begin_submit(&self.state, self.scorer.as_ref()) {
            Ok(ticket) => ticket,
            Err(GateError::Incomplete { missing }) => {
                warn!(
                    activity_id = %self.context.activity_id,
                    missing = missing.len(),
                    "submit refused: activity incomplete"
                );
                self.present(&Outcome::incomplete());
                return SubmitOutcome::Incomplete { missing };
            }
            Err(GateError::AlreadyCompleted) => return SubmitOutcome::AlreadyCompleted,
            Err(_) => return SubmitOutcome::InFlight,
        };

        let result = *ticket.result();
        let submission = Submission {
            activity_id: self.context.activity_id.clone(),
            module_id: self.context.module_id,
            quiz_type: self.context.quiz_kind,
            answers: ticket.answers().clone(),
            score_percent: result.score_percent(),
            correct_count: result.correct_count(),
            total_steps: result.total_steps(),
            completed_at: self.clock.now(),
        };
        info!(
            activity_id = %submission.activity_id,
            attempt = ticket.attempt(),
            score_percent = submission.score_percent,
            "submitting activity"
        );

        match self.submitter.submit(&submission).await {
            Ok(acknowledgment) => match self.gate.resolve(ticket) {
                Ok(result) => {
                    info!(
                        activity_id = %self.context.activity_id,
                        correct = result.correct_count(),
                        total = result.total_steps(),
                        "activity completed"
                    );
                    self.present(&Outcome::completed(&result, &self.settings));
                    SubmitOutcome::Completed {
                        result,
                        acknowledgment,
                    }
                }
                Err(err) => {
                    error!(error = %err, "gate refused its own ticket");
                    SubmitOutcome::InFlight
                }
            },
            Err(err) => {
                let message = err.to_string();
                match self.gate.reject(ticket, message.clone()) {
                    Ok(failure) => {
                        warn!(
                            activity_id = %self.context.activity_id,
                            attempt = failure.attempt,
                            error = %message,
                            "submission failed"
                        );
                        self.present(&Outcome::failed(&message));
                        SubmitOutcome::Failed {
                            attempt: failure.attempt,
                            message,
                        }
                    }
                    Err(gate_err) => {
                        error!(error = %gate_err, "gate refused its own ticket");
                        SubmitOutcome::InFlight
                    }
                }
            }
        }
    }

    /// Apply one input command.
    ///
    /// On an ordering board, `SelectOption(i)` places the board's `i`-th token.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns; `Submit` never errors.
    pub async fn dispatch(&mut self, command: KeyCommand) -> Result<CommandEffect, ControllerError> {
        match command {
            KeyCommand::Previous => Ok(CommandEffect::Moved(self.retreat()?)),
            KeyCommand::Next => Ok(CommandEffect::Moved(self.advance()?)),
            KeyCommand::SelectOption(option) => {
                if let Some(board) = &self.board {
                    let token = board.tokens().get(option).copied().ok_or(
                        ControllerError::OptionOutOfRange {
                            step: self.state.current_index(),
                            option,
                            options: board.slot_count(),
                        },
                    )?;
                    let slot = self.place_token(token)?;
                    Ok(CommandEffect::Placed { slot, token })
                } else {
                    let step = self.state.current_index();
                    self.select_option(option)?;
                    Ok(CommandEffect::Answered { step, option })
                }
            }
            KeyCommand::Submit => Ok(CommandEffect::Submitted(self.submit().await)),
            KeyCommand::Restart => {
                self.restart()?;
                Ok(CommandEffect::Restarted)
            }
        }
    }

    fn ensure_unlocked(&self) -> Result<(), ControllerError> {
        if self.gate.is_locked() {
            return Err(ControllerError::Locked {
                phase: self.gate.phase(),
            });
        }
        Ok(())
    }

    fn ensure_direct_answers(&self) -> Result<(), ControllerError> {
        if self.board.is_some() {
            return Err(ControllerError::UnsupportedInput {
                activity: "ordering",
                how: "placing cards",
            });
        }
        if self.topics.is_some() {
            return Err(ControllerError::UnsupportedInput {
                activity: "topic",
                how: "opening topics",
            });
        }
        Ok(())
    }

    fn present(&self, outcome: &Outcome) {
        if let Some(presenter) = &self.presenter {
            presenter.present(outcome);
        }
    }
}

fn topic_opened(_step: usize, answer: &AnswerValue) -> bool {
    matches!(answer, AnswerValue::Text(_))
}

impl fmt::Debug for ActivityController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityController")
            .field("context", &self.context)
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("phase", &self.gate.phase())
            .field("has_board", &self.board.is_some())
            .field("topics", &self.topics.as_ref().map(TopicTracker::progress_label))
            .field("has_presenter", &self.presenter.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordingSubmitter;
    use lesson_core::activity::AnswerKey;
    use lesson_core::model::Question;
    use lesson_core::time::fixed_clock;

    fn quiz(corrects: &[usize]) -> QuizDefinition {
        QuizDefinition {
            title: "Hygiene".into(),
            module_id: ModuleId::new(4),
            kind: QuizKind::Post,
            questions: corrects
                .iter()
                .map(|correct| Question {
                    prompt: "Pick one".into(),
                    options: vec!["A".into(), "B".into(), "C".into()],
                    correct: *correct,
                })
                .collect(),
        }
    }

    fn quiz_controller(corrects: &[usize]) -> (ActivityController, RecordingSubmitter) {
        let submitter = RecordingSubmitter::new();
        let controller = ActivityController::for_quiz(
            ActivityId::new("module-4-post").unwrap(),
            &quiz(corrects),
            Arc::new(submitter.clone()),
        )
        .unwrap()
        .with_clock(fixed_clock());
        (controller, submitter)
    }

    #[test]
    fn quiz_requires_answer_before_next() {
        let (mut controller, _) = quiz_controller(&[0, 1]);
        let err = controller.advance().unwrap_err();
        assert!(matches!(err, ControllerError::AnswerRequired { step: 0 }));

        controller.select_option(2).unwrap();
        assert!(controller.advance().unwrap());
        assert_eq!(controller.state().current_index(), 1);
    }

    #[test]
    fn option_beyond_question_is_rejected() {
        let (mut controller, _) = quiz_controller(&[0]);
        let err = controller.select_option(3).unwrap_err();
        assert!(matches!(
            err,
            ControllerError::OptionOutOfRange {
                step: 0,
                option: 3,
                options: 3
            }
        ));
        assert!(controller.state().answers().is_empty());
    }

    #[test]
    fn progress_reflects_state() {
        let (mut controller, _) = quiz_controller(&[0, 1, 2, 0]);
        controller.select_option(0).unwrap();
        controller.advance().unwrap();
        let progress = controller.progress();
        assert_eq!(progress.current_index, 1);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.label, "Step 2 of 4");
        assert!((progress.percent - 50.0).abs() < f64::EPSILON);
        assert!(!progress.can_submit);
        assert_eq!(progress.phase, GatePhase::InProgress);
    }

    #[test]
    fn generic_controller_does_not_gate_navigation() {
        let state = StepState::new(3).unwrap();
        let mut controller = ActivityController::new(
            ActivityContext::new(ActivityId::new("free-text").unwrap()),
            state,
            AnswerKey::new(),
            Arc::new(RecordingSubmitter::new()),
        );
        assert!(controller.advance().unwrap());
        assert!(controller.advance().unwrap());
        assert!(!controller.advance().unwrap());
        assert!(controller.place_token(1).is_err());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let (controller, _) = quiz_controller(&[0]);
        let settings = ActivitySettings {
            celebrate_threshold: 150,
            ..ActivitySettings::default()
        };
        assert!(matches!(
            controller.with_settings(settings),
            Err(ControllerError::Settings(_))
        ));
    }

    #[tokio::test]
    async fn topic_page_completes_after_every_card() {
        let submitter = RecordingSubmitter::new();
        let tracker = TopicTracker::new(["growth", "hygiene"]).unwrap();
        let mut controller = ActivityController::for_topics(
            ActivityContext::new(ActivityId::new("ahs-topics").unwrap()),
            tracker,
            Arc::new(submitter.clone()),
        )
        .unwrap();

        assert!(controller.open_topic("hygiene").unwrap());
        assert!(!controller.open_topic("hygiene").unwrap());
        assert!(matches!(
            controller.open_topic("mascot"),
            Err(ControllerError::Topic(_))
        ));
        assert!(!controller.progress().is_complete);

        controller.open_topic("growth").unwrap();
        let outcome = controller.submit().await;
        assert!(outcome.is_completed());
        assert_eq!(controller.result().map(ActivityResult::score_percent), Some(100));
        assert_eq!(
            controller.topics().map(TopicTracker::progress_label).as_deref(),
            Some("2 of 2 topics explored")
        );
    }

    #[tokio::test]
    async fn topic_steps_ignore_option_keys() {
        let submitter = RecordingSubmitter::new();
        let mut controller = ActivityController::for_topics(
            ActivityContext::new(ActivityId::new("ahs-topics").unwrap()),
            TopicTracker::new(["a", "b"]).unwrap(),
            Arc::new(submitter.clone()),
        )
        .unwrap();

        for command in [KeyCommand::SelectOption(0), KeyCommand::Next, KeyCommand::SelectOption(0)] {
            let result = controller.dispatch(command).await;
            if command != KeyCommand::Next {
                assert!(matches!(
                    result,
                    Err(ControllerError::UnsupportedInput { activity: "topic", .. })
                ));
            }
        }
        assert!(controller
            .record_answer(0, AnswerValue::Text("a".into()))
            .is_err());
        assert_eq!(controller.state().answered_count(), 0);

        let outcome = controller.dispatch(KeyCommand::Submit).await.unwrap();
        assert_eq!(
            outcome,
            CommandEffect::Submitted(SubmitOutcome::Incomplete { missing: vec![0, 1] })
        );
        assert_eq!(submitter.calls(), 0);
        assert_eq!(controller.phase(), GatePhase::InProgress);
    }

    #[test]
    fn board_slots_only_fill_through_placement() {
        let board = OrderingBoard::new(0..3).unwrap();
        let mut controller = ActivityController::for_ordering(
            ActivityContext::new(ActivityId::new("three-cards").unwrap()),
            board,
            &[0, 1, 2],
            Arc::new(RecordingSubmitter::new()),
        )
        .unwrap();

        for step in 0..3 {
            controller.go_to(step).unwrap();
            assert!(matches!(
                controller.select_option(0),
                Err(ControllerError::UnsupportedInput { activity: "ordering", .. })
            ));
        }
        assert!(controller
            .record_answer(1, AnswerValue::Choice(7))
            .is_err());
        assert!(controller.state().answers().is_empty());

        controller.place_token(0).unwrap();
        assert!(matches!(
            controller.place_token(0),
            Err(ControllerError::Ordering(_))
        ));
        assert!(!controller.progress().is_complete);
    }

    #[tokio::test]
    async fn completed_quiz_locks_everything() {
        let (mut controller, submitter) = quiz_controller(&[1]);
        controller.select_option(1).unwrap();
        let outcome = controller.submit().await;
        assert!(outcome.is_completed());
        assert_eq!(controller.result().map(ActivityResult::score_percent), Some(100));

        assert!(matches!(
            controller.select_option(0),
            Err(ControllerError::Locked {
                phase: GatePhase::Completed
            })
        ));
        assert!(controller.restart().is_err());
        assert!(controller.retreat().is_err());
        assert_eq!(controller.submit().await, SubmitOutcome::AlreadyCompleted);
        assert_eq!(submitter.calls(), 1);

        let sent = &submitter.accepted()[0];
        assert_eq!(sent.module_id, Some(ModuleId::new(4)));
        assert_eq!(sent.quiz_type, Some(QuizKind::Post));
        assert_eq!(sent.completed_at, lesson_core::time::fixed_now());
    }

    #[tokio::test]
    async fn dispatch_maps_keys() {
        let (mut controller, _) = quiz_controller(&[0, 2]);
        let effect = controller
            .dispatch(KeyCommand::from_key("1").unwrap())
            .await
            .unwrap();
        assert_eq!(effect, CommandEffect::Answered { step: 0, option: 0 });
        let effect = controller.dispatch(KeyCommand::Next).await.unwrap();
        assert_eq!(effect, CommandEffect::Moved(true));
        let effect = controller.dispatch(KeyCommand::Submit).await.unwrap();
        assert_eq!(
            effect,
            CommandEffect::Submitted(SubmitOutcome::Incomplete { missing: vec![1] })
        );
        controller.dispatch(KeyCommand::Restart).await.unwrap();
        assert_eq!(controller.state().answered_count(), 0);
        assert_eq!(controller.state().current_index(), 0);
    }
}
