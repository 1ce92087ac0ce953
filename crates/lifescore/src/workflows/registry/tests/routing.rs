use super::common::*;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::{DeliveryConfig, RegistryConfig};
use crate::workflows::registry::router::list_handler;
use crate::workflows::registry::{registry_router, ListQuery, RegistryService};

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn register_route_creates_users() {
    let (service, _) = build_service(30);
    let router = registry_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::post("/api/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({
                        "title": "Mrs.",
                        "name": "Sanduni",
                        "phone": "0779876543",
                        "email": "sanduni@example.com"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload: Value = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(payload["title"], "Mrs.");
    assert_eq!(payload["name"], "Sanduni");
}

#[tokio::test]
async fn register_route_rejects_blank_fields() {
    let (service, _) = build_service(30);
    let router = registry_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::post("/api/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"title": "Mr.", "name": "Asela", "phone": ""}))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload: Value = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(payload["error"], "phone is required");
}

#[tokio::test]
async fn list_route_reads_search_and_page() {
    let (service, _) = build_service(3);
    seed(&service, 7);
    let router = registry_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/users?search=member&page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload: Value = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(payload["page"], 2);
    assert_eq!(payload["total_pages"], 3);
    assert_eq!(payload["rows"][0]["serial"], 4);
    assert_eq!(payload["rows"][0]["phone"], "+94700000004");
}

#[tokio::test]
async fn export_route_serves_csv_attachment() {
    let (service, _) = build_service(30);
    seed(&service, 2);
    let router = registry_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/users/export?search=member2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .expect("ascii header")
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"users-"));
    assert!(disposition.ends_with(".csv\""));

    let body = body_text(response).await;
    assert_eq!(body.lines().count(), 2);
    assert!(body.contains("1,Member 02,+94700000002,member2@example.com,"));
}

#[tokio::test]
async fn list_handler_reports_store_outage() {
    let service = Arc::new(RegistryService::new(
        Arc::new(OfflineUsers),
        RegistryConfig::default(),
        &DeliveryConfig::default(),
    ));

    let response = list_handler::<OfflineUsers>(State(service), Query(ListQuery::default())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
