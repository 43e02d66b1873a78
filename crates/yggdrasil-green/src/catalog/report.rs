use std::io::Write;

use serde::Serialize;

use super::domain::Product;
use crate::scoring::{ScoreColor, ScoreRating, ScoreResult};

/// One line of the catalog score export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReportRow {
    pub product_id: String,
    pub name: String,
    pub stored_green_score: f64,
    pub green_score: f64,
    pub carbon_kg: f64,
    pub scoring_version: String,
    pub rating: ScoreRating,
    pub color: ScoreColor,
}

impl ScoreReportRow {
    pub fn new(product: &Product, result: &ScoreResult) -> Self {
        Self {
            product_id: product.id.0.clone(),
            name: product.name.clone(),
            stored_green_score: product.green_score,
            green_score: result.green_score,
            carbon_kg: result.carbon_kg,
            scoring_version: result.scoring_version.clone(),
            rating: ScoreRating::from_score(result.green_score),
            color: ScoreColor::from_score(result.green_score),
        }
    }

    /// True when the stored score no longer matches what the current weights produce.
    pub fn is_stale(&self) -> bool {
        (self.stored_green_score - self.green_score).abs() >= 0.05
    }
}

/// Write rows as CSV with a header line.
pub fn write_score_report<W: Write>(rows: &[ScoreReportRow], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
