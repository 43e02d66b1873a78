use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::catalog::router::{product_by_qr_handler, recompute_handler};
use crate::catalog::service::ScoreService;
use crate::scoring::StaticScoringConfigStore;

#[tokio::test]
async fn product_route_returns_record_for_known_code() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(
            Request::get("/products/by-qr/YGG-TSHIRT-001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], "prod-001");
    assert_eq!(payload["lifecycle_stages"][0]["stage"], "materials");
    assert_eq!(payload["claims"][0]["type"], "certification");
}

#[tokio::test]
async fn product_handler_returns_not_found_with_code() {
    let service = Arc::new(build_service());

    let response = product_by_qr_handler::<MemoryDirectory, StaticScoringConfigStore>(
        State(service),
        Path("UNKNOWN-QR".to_string()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["code"], "UNKNOWN-QR");
    assert_eq!(payload["error"], "Product not found");
}

#[tokio::test]
async fn recompute_route_returns_fresh_score() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(
            Request::post("/score/recompute/prod-001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["product_id"], "prod-001");
    assert_eq!(payload["green_score"], 74.5);
    assert_eq!(payload["carbon_kg"], 5.12);
    assert_eq!(payload["scoring_version"], "v1.0");
    assert!(payload["recomputed_at"].is_string());
}

#[tokio::test]
async fn recompute_handler_maps_missing_product_to_not_found() {
    let service = Arc::new(build_service());

    let response = recompute_handler::<MemoryDirectory, StaticScoringConfigStore>(
        State(service),
        Path("prod-404".to_string()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["product_id"], "prod-404");
}

#[tokio::test]
async fn recompute_handler_maps_config_failure_to_server_error() {
    let service = Arc::new(service_without_config());

    let response = recompute_handler::<MemoryDirectory, StaticScoringConfigStore>(
        State(service),
        Path("prod-001".to_string()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("not found"));
}

#[tokio::test]
async fn directory_failure_is_a_server_error() {
    let service = Arc::new(ScoreService::new(
        Arc::new(UnavailableDirectory),
        Arc::new(standard_store()),
    ));

    let response = product_by_qr_handler::<UnavailableDirectory, StaticScoringConfigStore>(
        State(service),
        Path("YGG-TSHIRT-001".to_string()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn badge_route_reports_rating_and_color() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(
            Request::get("/score/prod-001/badge")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["rating"], "Good");
    assert_eq!(payload["color"], "yellow");
}

#[tokio::test]
async fn scan_events_are_acknowledged_with_created() {
    let router = router_with_service(build_service());
    let event = json!({
        "product_id": "prod-001",
        "qr_code": "YGG-TSHIRT-001",
        "user_wallet": "0x00000000000000000000000000000000000000aa"
    });

    let response = router
        .oneshot(
            Request::post("/scan-events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&event).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "logged");
    assert_eq!(payload["event"]["qr_code"], "YGG-TSHIRT-001");
    assert!(payload["event"]["timestamp"].is_string());
}
