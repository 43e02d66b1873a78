use serde::{Deserialize, Serialize};
use std::fmt;

/// One phase of a product's life. The set is closed so weight tables can only name
/// stages the scorer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStageKind {
    Materials,
    Production,
    Transport,
    Use,
    EndOfLife,
}

impl LifecycleStageKind {
    pub const ALL: [LifecycleStageKind; 5] = [
        LifecycleStageKind::Materials,
        LifecycleStageKind::Production,
        LifecycleStageKind::Transport,
        LifecycleStageKind::Use,
        LifecycleStageKind::EndOfLife,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStageKind::Materials => "materials",
            LifecycleStageKind::Production => "production",
            LifecycleStageKind::Transport => "transport",
            LifecycleStageKind::Use => "use",
            LifecycleStageKind::EndOfLife => "end_of_life",
        }
    }
}

impl fmt::Display for LifecycleStageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional per-stage measurements. Absent values are treated as missing data, never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A lifecycle entry as shown in the product viewer. Products keep these in display order
/// and the same stage may appear more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleStage {
    pub stage: LifecycleStageKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<LifecycleMetrics>,
}

impl LifecycleStage {
    pub fn new(stage: LifecycleStageKind, title: impl Into<String>) -> Self {
        Self {
            stage,
            title: title.into(),
            description: String::new(),
            hotspot_position: None,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, score: Option<f64>, carbon_kg: Option<f64>) -> Self {
        self.metrics = Some(LifecycleMetrics {
            score,
            carbon_kg,
            details: None,
        });
        self
    }

    pub fn score(&self) -> Option<f64> {
        self.metrics.as_ref().and_then(|metrics| metrics.score)
    }

    pub fn carbon_kg(&self) -> Option<f64> {
        self.metrics.as_ref().and_then(|metrics| metrics.carbon_kg)
    }
}
