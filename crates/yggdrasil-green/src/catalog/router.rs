use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use super::directory::ProductDirectory;
use super::domain::{Product, ProductId};
use super::scans::{acknowledge_scan, ScanEvent};
use super::service::{ScoreBadge, ScoreRecomputation, ScoreService};
use crate::error::AppError;
use crate::scoring::ScoringConfigStore;

/// Router builder exposing product lookup, score recompute and scan intake.
pub fn catalog_router<D, S>(service: Arc<ScoreService<D, S>>) -> Router
where
    D: ProductDirectory + 'static,
    S: ScoringConfigStore + 'static,
{
    Router::new()
        .route("/products/by-qr/:code", get(product_by_qr_handler::<D, S>))
        .route(
            "/score/recompute/:product_id",
            post(recompute_handler::<D, S>),
        )
        .route("/score/:product_id/badge", get(badge_handler::<D, S>))
        .route("/scan-events", post(scan_event_handler))
        .with_state(service)
}

pub(crate) async fn product_by_qr_handler<D, S>(
    State(service): State<Arc<ScoreService<D, S>>>,
    Path(code): Path<String>,
) -> Result<Json<Product>, AppError>
where
    D: ProductDirectory + 'static,
    S: ScoringConfigStore + 'static,
{
    Ok(Json(service.product_by_qr(&code)?))
}

pub(crate) async fn recompute_handler<D, S>(
    State(service): State<Arc<ScoreService<D, S>>>,
    Path(product_id): Path<String>,
) -> Result<Json<ScoreRecomputation>, AppError>
where
    D: ProductDirectory + 'static,
    S: ScoringConfigStore + 'static,
{
    Ok(Json(service.recompute(&ProductId(product_id))?))
}

pub(crate) async fn badge_handler<D, S>(
    State(service): State<Arc<ScoreService<D, S>>>,
    Path(product_id): Path<String>,
) -> Result<Json<ScoreBadge>, AppError>
where
    D: ProductDirectory + 'static,
    S: ScoringConfigStore + 'static,
{
    Ok(Json(service.badge(&ProductId(product_id))?))
}

pub(crate) async fn scan_event_handler(Json(event): Json<ScanEvent>) -> impl IntoResponse {
    let ack = acknowledge_scan(event);
    (StatusCode::CREATED, Json(ack))
}
