use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::repository::{
    CompletionSink, RepositoryError, SessionRecord, SessionStore, SinkError,
};
use crate::workflows::assessment::{assessment_router, AssessmentService, SessionId};
use crate::workflows::questionnaire::QuestionBank;
use crate::workflows::report::{CompletionPayload, Salutation, UserProfile};

pub(super) fn profile() -> UserProfile {
    UserProfile {
        title: Salutation::Mrs,
        name: "Chathurika Jayasinghe".to_string(),
        phone: "0771234567".to_string(),
        email: "chathurika@example.com".to_string(),
    }
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryStore, MemorySink>,
    Arc<MemoryStore>,
    Arc<MemorySink>,
) {
    let store = Arc::new(MemoryStore::default());
    let sink = Arc::new(MemorySink::default());
    let service = AssessmentService::new(
        store.clone(),
        sink.clone(),
        Arc::new(QuestionBank::standard()),
    );
    (service, store, sink)
}

/// Selects and confirms each option index in turn.
pub(super) fn answer<S, C>(service: &AssessmentService<S, C>, id: &SessionId, choices: &[usize])
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    for choice in choices {
        service.select(id, *choice).expect("option selectable");
        service.confirm(id).expect("answer confirmed");
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
    pub(super) updates: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub(super) fn update_count(&self) -> usize {
        *self.updates.lock().expect("store mutex poisoned")
    }
}

impl SessionStore for MemoryStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        *self.updates.lock().expect("store mutex poisoned") += 1;
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    events: Arc<Mutex<Vec<CompletionPayload>>>,
}

impl MemorySink {
    pub(super) fn events(&self) -> Vec<CompletionPayload> {
        self.events.lock().expect("sink mutex poisoned").clone()
    }
}

impl CompletionSink for MemorySink {
    fn publish(&self, payload: &CompletionPayload) -> Result<(), SinkError> {
        self.events
            .lock()
            .expect("sink mutex poisoned")
            .push(payload.clone());
        Ok(())
    }
}

pub(super) struct OfflineSink;

impl CompletionSink for OfflineSink {
    fn publish(&self, _payload: &CompletionPayload) -> Result<(), SinkError> {
        Err(SinkError::Transport("connection refused".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: AssessmentService<MemoryStore, MemorySink>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}
