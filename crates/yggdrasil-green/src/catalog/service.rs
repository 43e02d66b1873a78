use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::directory::{DirectoryError, ProductDirectory};
use super::domain::{Product, ProductId};
use super::report::ScoreReportRow;
use crate::scoring::{
    compute_score, GreenScorer, ScoreColor, ScoreRating, ScoringConfigError, ScoringConfigStore,
};

/// Fresh score for a stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecomputation {
    pub product_id: ProductId,
    pub green_score: f64,
    pub carbon_kg: f64,
    pub scoring_version: String,
    pub recomputed_at: DateTime<Utc>,
}

/// Display classification of the score stored on a product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBadge {
    pub product_id: ProductId,
    pub green_score: f64,
    pub scoring_version: String,
    pub rating: ScoreRating,
    pub color: ScoreColor,
}

/// Service composing the product directory with the green scorer.
pub struct ScoreService<D, S> {
    directory: Arc<D>,
    store: Arc<S>,
    scorer: GreenScorer<S>,
}

impl<D, S> ScoreService<D, S>
where
    D: ProductDirectory + 'static,
    S: ScoringConfigStore + 'static,
{
    pub fn new(directory: Arc<D>, store: Arc<S>) -> Self {
        let scorer = GreenScorer::new(store.clone());
        Self {
            directory,
            store,
            scorer,
        }
    }

    pub fn product_by_qr(&self, code: &str) -> Result<Product, ScoreServiceError> {
        self.directory
            .find_by_qr(code)?
            .ok_or_else(|| ScoreServiceError::QrCodeNotFound(code.to_string()))
    }

    pub fn product(&self, id: &ProductId) -> Result<Product, ScoreServiceError> {
        self.directory
            .find_by_id(id)?
            .ok_or_else(|| ScoreServiceError::ProductNotFound(id.clone()))
    }

    /// Re-run the scorer over a product's lifecycle with the current weight table.
    pub fn recompute(&self, id: &ProductId) -> Result<ScoreRecomputation, ScoreServiceError> {
        let product = self.product(id)?;
        let result = self.scorer.score(&product.lifecycle_stages)?;

        info!(
            product_id = %id.0,
            green_score = result.green_score,
            carbon_kg = result.carbon_kg,
            scoring_version = %result.scoring_version,
            "green score recomputed"
        );

        Ok(ScoreRecomputation {
            product_id: product.id,
            green_score: result.green_score,
            carbon_kg: result.carbon_kg,
            scoring_version: result.scoring_version,
            recomputed_at: Utc::now(),
        })
    }

    pub fn badge(&self, id: &ProductId) -> Result<ScoreBadge, ScoreServiceError> {
        let product = self.product(id)?;
        Ok(ScoreBadge {
            rating: ScoreRating::from_score(product.green_score),
            color: ScoreColor::from_score(product.green_score),
            product_id: product.id,
            green_score: product.green_score,
            scoring_version: product.scoring_version,
        })
    }

    /// Score every product in the directory against a single load of the weight table.
    pub fn report(&self) -> Result<Vec<ScoreReportRow>, ScoreServiceError> {
        let config = self.store.load()?;
        let products = self.directory.all()?;

        let rows = products
            .into_iter()
            .map(|product| {
                let result = compute_score(&product.lifecycle_stages, &config);
                ScoreReportRow::new(&product, &result)
            })
            .collect::<Vec<_>>();

        info!(
            products = rows.len(),
            scoring_version = %config.version,
            "score report generated"
        );
        Ok(rows)
    }
}

/// Error raised by the score service.
#[derive(Debug, thiserror::Error)]
pub enum ScoreServiceError {
    #[error("product '{0}' not found")]
    ProductNotFound(ProductId),
    #[error("product with QR code '{0}' not found")]
    QrCodeNotFound(String),
    #[error(transparent)]
    Scoring(#[from] ScoringConfigError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
