use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use yggdrasil_green::catalog::{catalog_router, ProductDirectory, ScoreService};
use yggdrasil_green::issuance::{issuance_router, ChainGateway, IssuanceService};
use yggdrasil_green::scoring::ScoringConfigStore;

const SERVICE_NAME: &str = "Yggdrasil Green Score API";

const ENDPOINTS: [&str; 9] = [
    "GET /products/by-qr/:code",
    "POST /score/recompute/:product_id",
    "GET /score/:product_id/badge",
    "POST /scan-events",
    "POST /blockchain/mint-cert",
    "POST /blockchain/reward",
    "GET /health",
    "GET /ready",
    "GET /metrics",
];

pub(crate) fn with_service_routes<D, S, G>(
    scores: Arc<ScoreService<D, S>>,
    issuance: Arc<IssuanceService<G>>,
) -> axum::Router
where
    D: ProductDirectory + 'static,
    S: ScoringConfigStore + 'static,
    G: ChainGateway + 'static,
{
    catalog_router(scores)
        .merge(issuance_router(issuance))
        .route("/", get(service_index))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn service_index() -> Json<serde_json::Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": ENDPOINTS,
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
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
