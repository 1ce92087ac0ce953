use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ReportRequest, SelectRequest, SessionId, StartRequest};
use super::repository::{CompletionSink, RepositoryError, SessionStore};
use super::service::{AssessmentService, AssessmentServiceError};
use crate::workflows::questionnaire::AssessmentError;
use crate::workflows::report::render;

/// Router builder exposing the question bank and session lifecycle.
pub fn assessment_router<S, C>(service: Arc<AssessmentService<S, C>>) -> Router
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/questionnaire/questions",
            get(questions_handler::<S, C>),
        )
        .route("/api/v1/assessments", post(start_handler::<S, C>))
        .route("/api/v1/assessments/:session_id", get(status_handler::<S, C>))
        .route(
            "/api/v1/assessments/:session_id/select",
            post(select_handler::<S, C>),
        )
        .route(
            "/api/v1/assessments/:session_id/confirm",
            post(confirm_handler::<S, C>),
        )
        .route(
            "/api/v1/assessments/:session_id/reset",
            post(reset_handler::<S, C>),
        )
        .route(
            "/api/v1/assessments/:session_id/report",
            post(report_handler::<S, C>),
        )
        .with_state(service)
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AssessmentServiceError::Assessment(
            AssessmentError::NoSelection { .. }
            | AssessmentError::IncompleteAssessment { .. }
            | AssessmentError::AlreadyCompleted,
        ) => StatusCode::CONFLICT,
        AssessmentServiceError::Assessment(AssessmentError::OutOfRange { .. })
        | AssessmentServiceError::InvalidProfile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Assessment(
            AssessmentError::SummaryMismatch { .. } | AssessmentError::InvalidQuestion(_),
        ) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn questions_handler<S, C>(
    State(service): State<Arc<AssessmentService<S, C>>>,
) -> Response
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    let bank = service.bank();
    let payload = json!({
        "questions": bank.questions(),
        "max_score": bank.max_score(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn start_handler<S, C>(
    State(service): State<Arc<AssessmentService<S, C>>>,
    axum::Json(request): axum::Json<StartRequest>,
) -> Response
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    match service.start(request.into_profile()) {
        Ok(record) => {
            (StatusCode::CREATED, axum::Json(record.view(service.bank()))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<S, C>(
    State(service): State<Arc<AssessmentService<S, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view(service.bank()))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn select_handler<S, C>(
    State(service): State<Arc<AssessmentService<S, C>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<SelectRequest>,
) -> Response
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    match service.select(&SessionId(session_id), request.option_index) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view(service.bank()))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn confirm_handler<S, C>(
    State(service): State<Arc<AssessmentService<S, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    match service.confirm(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view(service.bank()))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<S, C>(
    State(service): State<Arc<AssessmentService<S, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    match service.reset(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view(service.bank()))).into_response(),
        Err(error) => error_response(error),
    }
}

/// An empty body means no readings; anything else must parse.
fn parse_report_request(body: &[u8]) -> Result<ReportRequest, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReportRequest::default());
    }
    serde_json::from_slice(body).map_err(|error| {
        let payload = json!({
            "error": format!("invalid report request: {error}"),
        });
        (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
    })
}

/// Returns the report model alongside its channel-neutral content and text rendering.
pub(crate) async fn report_handler<S, C>(
    State(service): State<Arc<AssessmentService<S, C>>>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> Response
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
{
    let request = match parse_report_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    match service.report(&SessionId(session_id), request.supplementary.as_ref()) {
        Ok(report) => {
            let payload = json!({
                "content": report.content(),
                "text": render::plain_text(&report),
                "report": report,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
