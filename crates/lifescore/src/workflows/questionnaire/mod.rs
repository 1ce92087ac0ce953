//! Question bank, scoring session state machine, and status classification.

mod bank;
mod error;
mod scoring;
mod session;
mod status;

pub use bank::{AnswerOption, Question, QuestionBank, MAX_OPTION_SCORE};
pub use error::AssessmentError;
pub use scoring::ScoreSummary;
pub use session::{Advance, QuestionnaireSession, SessionState};
pub use status::{HealthStatus, LifescoreStatus, DEFAULT_LIFESCORE};
