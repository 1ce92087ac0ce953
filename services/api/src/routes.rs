use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use lifescore::workflows::assessment::{
    assessment_router, AssessmentService, CompletionSink, SessionStore,
};
use lifescore::workflows::delivery::artifacts::pdf_report_name;
use lifescore::workflows::delivery::whatsapp::share_link;
use lifescore::workflows::registry::{registry_router, RegistryService, UserRepository};
use lifescore::workflows::report::render::{self, EmailMessage};
use lifescore::workflows::report::{HealthCard, SupplementaryScores, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct HealthCardRequest {
    pub(crate) user: UserProfile,
    #[serde(default)]
    pub(crate) lifescore: Option<u8>,
    #[serde(flatten)]
    pub(crate) readings: SupplementaryScores,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthCardResponse {
    pub(crate) card: HealthCard,
    pub(crate) file_name: String,
    pub(crate) report_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) email: Option<EmailMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) whatsapp_link: Option<String>,
}

pub(crate) fn with_lifescore_routes<S, C, R>(
    assessments: Arc<AssessmentService<S, C>>,
    registry: Arc<RegistryService<R>>,
) -> axum::Router
where
    S: SessionStore + 'static,
    C: CompletionSink + 'static,
    R: UserRepository + 'static,
{
    assessment_router(assessments)
        .merge(registry_router(registry))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/health-card",
            axum::routing::post(health_card_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Comprehensive health card: lifescore tier, reading analysis and the downloadable text.
/// The e-mail and share link appear once all three readings are present.
pub(crate) async fn health_card_endpoint(
    Json(payload): Json<HealthCardRequest>,
) -> Json<HealthCardResponse> {
    let HealthCardRequest {
        user,
        lifescore,
        readings,
    } = payload;

    let now = Utc::now();
    let card = HealthCard::new(lifescore, readings);
    let report_text = render::comprehensive_text(&user, &card, None, now);
    let email = render::health_card_email(&user, &card);
    let whatsapp_link =
        render::health_card_whatsapp(&user, &card, now).map(|message| share_link(None, &message));

    Json(HealthCardResponse {
        file_name: pdf_report_name(&user.name, now.date_naive()),
        card,
        report_text,
        email,
        whatsapp_link,
    })
}
