//! Green score engine: weight tables, aggregation, and display classification.

mod aggregate;
mod config;
mod rating;
mod stage;
mod store;

pub use aggregate::{compute_score, ScoreResult, DEFAULT_STAGE_SCORE};
pub use config::{
    ConfigViolation, ScoringConfig, ScoringConfigError, ValidationMode, WEIGHT_SUM_TOLERANCE,
};
pub use rating::{display_color, rating_label, ScoreColor, ScoreRating};
pub use stage::{LifecycleMetrics, LifecycleStage, LifecycleStageKind};
pub use store::{FileScoringConfigStore, ScoringConfigStore, StaticScoringConfigStore};

use std::sync::Arc;

/// Scores lifecycles against whatever weight table the store currently holds.
pub struct GreenScorer<S> {
    store: Arc<S>,
}

impl<S> GreenScorer<S>
where
    S: ScoringConfigStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Loads the config and scores the stages. A config failure aborts before any
    /// stage is looked at.
    pub fn score(&self, stages: &[LifecycleStage]) -> Result<ScoreResult, ScoringConfigError> {
        let config = self.store.load()?;
        Ok(compute_score(stages, &config))
    }
}

impl<S> Clone for GreenScorer<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
