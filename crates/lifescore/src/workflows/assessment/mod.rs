//! Questionnaire sessions persisted behind a store, plus the HTTP surface that drives them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ReportRequest, SelectRequest, SessionId, SessionView, StartRequest};
pub use repository::{
    CompletionSink, RepositoryError, SessionRecord, SessionStore, SinkError,
};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
