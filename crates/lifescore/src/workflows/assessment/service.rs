use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::SessionId;
use super::repository::{CompletionSink, RepositoryError, SessionRecord, SessionStore};
use crate::workflows::questionnaire::{Advance, AssessmentError, QuestionBank, QuestionnaireSession};
use crate::workflows::report::{ReportAssembler, ReportModel, SupplementaryScores, UserProfile};

/// Drives questionnaire sessions: persists every state change and publishes completions.
pub struct AssessmentService<S, C> {
    store: Arc<S>,
    sink: Arc<C>,
    assembler: ReportAssembler,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("asm-{id:06}"))
}

impl<S, C> AssessmentService<S, C>
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    pub fn new(store: Arc<S>, sink: Arc<C>, bank: Arc<QuestionBank>) -> Self {
        Self {
            store,
            sink,
            assembler: ReportAssembler::new(bank),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        self.assembler.bank()
    }

    pub fn start(&self, user: UserProfile) -> Result<SessionRecord, AssessmentServiceError> {
        if user.name.trim().is_empty() {
            return Err(AssessmentServiceError::InvalidProfile(
                "name is required".to_string(),
            ));
        }

        let record = SessionRecord {
            id: next_session_id(),
            user,
            session: QuestionnaireSession::new(),
            report: None,
            started_at: Utc::now(),
        };
        let stored = self.store.insert(record)?;
        info!(session_id = %stored.id, "assessment started");
        Ok(stored)
    }

    pub fn select(
        &self,
        id: &SessionId,
        option_index: usize,
    ) -> Result<SessionRecord, AssessmentServiceError> {
        let mut record = self.fetch(id)?;
        record.session.select_option(self.bank(), option_index)?;
        self.store.update(record.clone())?;
        Ok(record)
    }

    /// Record the selected option and move on. The final confirmation freezes the report.
    pub fn confirm(&self, id: &SessionId) -> Result<SessionRecord, AssessmentServiceError> {
        let mut record = self.fetch(id)?;
        let advance = record.session.confirm_and_advance(self.bank())?;

        if let Advance::Completed { scores } = advance {
            let summary = record.session.summary(self.bank());
            let report = self.assembler.assemble(&record.user, summary, &scores, None)?;
            info!(
                session_id = %record.id,
                total_score = summary.total_score,
                percentage = summary.percentage,
                status = report.status.label(),
                "assessment completed"
            );
            record.report = Some(report);
            self.store.update(record.clone())?;
            self.publish_completion(&record);
        } else {
            self.store.update(record.clone())?;
        }

        Ok(record)
    }

    pub fn reset(&self, id: &SessionId) -> Result<SessionRecord, AssessmentServiceError> {
        let mut record = self.fetch(id)?;
        record.session.reset();
        record.report = None;
        self.store.update(record.clone())?;
        info!(session_id = %record.id, "assessment reset");
        Ok(record)
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionRecord, AssessmentServiceError> {
        self.fetch(id)
    }

    /// The frozen report, optionally enriched with supplementary readings.
    ///
    /// The generation timestamp of the stored report is reused, so repeated calls
    /// with the same readings produce equal models.
    pub fn report(
        &self,
        id: &SessionId,
        supplementary: Option<&SupplementaryScores>,
    ) -> Result<ReportModel, AssessmentServiceError> {
        let record = self.fetch(id)?;
        let stored = record.report.ok_or(AssessmentError::IncompleteAssessment {
            answered: record.session.recorded_scores().len(),
            expected: self.bank().count(),
        })?;

        match supplementary {
            None => Ok(stored),
            Some(readings) => Ok(self.assembler.assemble_at(
                &stored.user,
                stored.summary,
                &stored.scores(),
                Some(readings),
                stored.generated_at,
            )?),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<SessionRecord, AssessmentServiceError> {
        let record = self.store.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn publish_completion(&self, record: &SessionRecord) {
        let Some(report) = &record.report else {
            return;
        };
        if let Err(error) = self.sink.publish(&report.completion_payload()) {
            warn!(session_id = %record.id, %error, "completion payload not delivered");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("invalid respondent: {0}")]
    InvalidProfile(String),
}
