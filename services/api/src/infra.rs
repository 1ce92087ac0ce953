use lifescore::workflows::assessment::{
    CompletionSink, RepositoryError, SessionId, SessionRecord, SessionStore, SinkError,
};
use lifescore::workflows::delivery::{DeliveryError, PdfRenderer};
use lifescore::workflows::registry::{self, RegisteredUser, UserRepository};
use lifescore::workflows::report::{CompletionPayload, ReportModel};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>, String> {
    mutex.lock().map_err(|_| format!("{store} mutex poisoned"))
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = lock(&self.records, "session").map_err(RepositoryError::Unavailable)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "session").map_err(RepositoryError::Unavailable)?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = lock(&self.records, "session").map_err(RepositoryError::Unavailable)?;
        Ok(guard.get(id).cloned())
    }
}

/// Keeps completion payloads in memory and logs each one.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCompletionSink {
    events: Arc<Mutex<Vec<CompletionPayload>>>,
}

impl CompletionSink for InMemoryCompletionSink {
    fn publish(&self, payload: &CompletionPayload) -> Result<(), SinkError> {
        let mut guard = lock(&self.events, "completion").map_err(SinkError::Transport)?;
        info!(
            total_score = payload.total_score,
            percentage = payload.percentage,
            "questionnaire result recorded"
        );
        guard.push(payload.clone());
        Ok(())
    }
}

impl InMemoryCompletionSink {
    #[cfg(test)]
    pub(crate) fn events(&self) -> Vec<CompletionPayload> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<RegisteredUser>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: RegisteredUser) -> Result<RegisteredUser, registry::RepositoryError> {
        let mut guard =
            lock(&self.users, "user").map_err(registry::RepositoryError::Unavailable)?;
        if guard.iter().any(|existing| existing.id == user.id) {
            return Err(registry::RepositoryError::Conflict);
        }
        guard.push(user.clone());
        Ok(user)
    }

    fn list(&self) -> Result<Vec<RegisteredUser>, registry::RepositoryError> {
        let guard = lock(&self.users, "user").map_err(registry::RepositoryError::Unavailable)?;
        Ok(guard.clone())
    }
}

/// Stand-in for hosts without a PDF engine; delivery falls back to the text report.
pub(crate) struct UnconfiguredPdfRenderer;

impl PdfRenderer for UnconfiguredPdfRenderer {
    fn render(&self, _report: &ReportModel) -> Result<Vec<u8>, DeliveryError> {
        Err(DeliveryError::Render(
            "no PDF renderer is configured".to_string(),
        ))
    }
}
