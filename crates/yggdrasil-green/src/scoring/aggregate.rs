use super::config::ScoringConfig;
use super::stage::{LifecycleStage, LifecycleStageKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Score assumed for a weighted stage that reports no score of its own.
pub const DEFAULT_STAGE_SCORE: f64 = 50.0;

/// Outcome of one scoring pass, tagged with the weight table version that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub green_score: f64,
    pub carbon_kg: f64,
    pub scoring_version: String,
}

/// Weighted green score and carbon total for a product's lifecycle.
///
/// Only stages named in the weight table feed the score; a weighted stage with no
/// reported score counts as [`DEFAULT_STAGE_SCORE`]. When a stage appears more than once
/// the last reported score wins. Carbon is summed across every stage regardless of
/// weighting. Scores round to one decimal and carbon to two, halves away from zero.
///
/// Weighted terms are added in [`LifecycleStageKind`] order (materials through end of
/// life), not in the key order of the weight table document, so the unrounded total is
/// the same however the table was written.
pub fn compute_score(stages: &[LifecycleStage], config: &ScoringConfig) -> ScoreResult {
    let mut reported: HashMap<LifecycleStageKind, f64> = HashMap::new();
    for stage in stages {
        if let Some(score) = stage.score() {
            reported.insert(stage.stage, score);
        }
    }

    let total = config
        .weights
        .iter()
        .map(|(stage, weight)| {
            let score = reported.get(stage).copied().unwrap_or(DEFAULT_STAGE_SCORE);
            weight * score
        })
        .fold(0.0, |acc, term| acc + term);

    let carbon = stages
        .iter()
        .filter_map(LifecycleStage::carbon_kg)
        .fold(0.0, |acc, kg| acc + kg);

    ScoreResult {
        green_score: round_to(total, 1),
        carbon_kg: round_to(carbon, 2),
        scoring_version: config.version.clone(),
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
