use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{SessionId, SessionView};
use crate::workflows::questionnaire::{QuestionBank, QuestionnaireSession};
use crate::workflows::report::{CompletionPayload, ReportModel, UserProfile};

/// Stored session: respondent, questionnaire progress and, once complete, the frozen report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub user: UserProfile,
    pub session: QuestionnaireSession,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportModel>,
    pub started_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn view(&self, bank: &QuestionBank) -> SessionView {
        let completed = self.session.is_completed();
        SessionView {
            session_id: self.id.clone(),
            respondent: self.user.display_name(),
            state: self.session.state(),
            answered: self.session.recorded_scores().len(),
            total_questions: bank.count(),
            question: self.session.current_question(bank).cloned(),
            selected_option_index: self.session.selected_option_index(),
            summary: completed.then(|| self.session.summary(bank)),
            status: self.report.as_ref().map(|report| report.status.label()),
        }
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Receives completed-questionnaire results (the results backend).
pub trait CompletionSink: Send + Sync {
    fn publish(&self, payload: &CompletionPayload) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("results backend unavailable: {0}")]
    Transport(String),
}
