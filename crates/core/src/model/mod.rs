mod answer;
mod ids;
mod outcome;
mod quiz;
mod settings;

pub use answer::AnswerValue;
pub use ids::{ActivityId, ModuleId, ParseIdError};
pub use outcome::{ActivityResult, ScoreBand, score_percent};
pub use quiz::{Question, QuizDefinition, QuizError, QuizKind};
pub use settings::{ActivitySettings, SettingsError, SettingsOverrides};
