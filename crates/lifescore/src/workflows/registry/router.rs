use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::Registration;
use super::repository::{RepositoryError, UserRepository};
use super::service::{ListQuery, RegistryService, RegistryServiceError};

/// Router builder for sign-up and the admin user list.
pub fn registry_router<R>(service: Arc<RegistryService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/users",
            post(register_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/users/export", get(export_handler::<R>))
        .with_state(service)
}

fn error_response(error: RegistryServiceError) -> Response {
    let status = match &error {
        RegistryServiceError::Registration(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistryServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RegistryServiceError::Repository(RepositoryError::Unavailable(_))
        | RegistryServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<RegistryService<R>>>,
    axum::Json(registration): axum::Json<Registration>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.register(registration) {
        Ok(user) => (StatusCode::CREATED, axum::Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<RegistryService<R>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.list(&query) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<RegistryService<R>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.export(&query, Utc::now().date_naive()) {
        Ok(export) => {
            let disposition = format!("attachment; filename=\"{}\"", export.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.body,
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}
