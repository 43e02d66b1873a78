use super::stage::LifecycleStageKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowed drift between the configured weight total and 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Versioned weight table driving the green score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub version: String,
    pub weights: BTreeMap<LifecycleStageKind, f64>,
}

impl ScoringConfig {
    pub fn new(version: impl Into<String>, weights: BTreeMap<LifecycleStageKind, f64>) -> Self {
        Self {
            version: version.into(),
            weights,
        }
    }

    /// The v1.0 weighting: materials 35%, production 30%, transport 20%, end of life 15%.
    pub fn standard() -> Self {
        let weights = BTreeMap::from([
            (LifecycleStageKind::Materials, 0.35),
            (LifecycleStageKind::Production, 0.30),
            (LifecycleStageKind::Transport, 0.20),
            (LifecycleStageKind::EndOfLife, 0.15),
        ]);
        Self::new("v1.0", weights)
    }

    pub fn weight_total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn validate(&self, mode: ValidationMode) -> Result<(), ConfigViolation> {
        if self.version.trim().is_empty() {
            return Err(ConfigViolation::MissingVersion);
        }

        for (stage, weight) in &self.weights {
            if !weight.is_finite() {
                return Err(ConfigViolation::NonFiniteWeight { stage: *stage });
            }
            if *weight < 0.0 {
                return Err(ConfigViolation::NegativeWeight {
                    stage: *stage,
                    weight: *weight,
                });
            }
        }

        if mode == ValidationMode::Strict {
            let sum = self.weight_total();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(ConfigViolation::WeightSum { sum });
            }
        }

        Ok(())
    }
}

/// How strictly a freshly loaded weight table is checked.
///
/// `Relaxed` skips the weight-sum check so legacy tables that never summed to 1.0 keep
/// scoring the way they always did. The non-empty version, sign and finiteness checks
/// apply in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Strict,
    Relaxed,
}

impl ValidationMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "relaxed" => Some(Self::Relaxed),
            _ => None,
        }
    }
}

/// Reasons a weight table is refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigViolation {
    #[error("scoring version must not be empty")]
    MissingVersion,
    #[error("weight for {stage} is not a finite number")]
    NonFiniteWeight { stage: LifecycleStageKind },
    #[error("weight for {stage} is negative ({weight})")]
    NegativeWeight {
        stage: LifecycleStageKind,
        weight: f64,
    },
    #[error("weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },
}

/// Failure to obtain a usable scoring configuration.
#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("scoring config not found at {location}")]
    NotFound { location: String },
    #[error("scoring config at {location} is invalid: {violation}")]
    Invalid {
        location: String,
        violation: ConfigViolation,
    },
    #[error("scoring config at {location} is malformed: {source}")]
    Malformed {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("scoring config at {location} could not be read: {source}")]
    Unreadable {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScoringConfigError {
    /// True for every failure caused by the contents of the config rather than its absence.
    pub fn is_invalid(&self) -> bool {
        matches!(
            self,
            ScoringConfigError::Invalid { .. } | ScoringConfigError::Malformed { .. }
        )
    }
}
