//! Product catalog: provenance records, score recompute, and scan intake.

pub mod directory;
pub mod domain;
pub mod report;
pub mod router;
pub mod scans;
pub mod service;

#[cfg(test)]
mod tests;

pub use directory::{DirectoryError, JsonProductDirectory, ProductDirectory};
pub use domain::{
    BlockchainRecord, Claim, ClaimType, Product, ProductCategory, ProductId, ProductMetadata,
    ProductViolation,
};
pub use report::{write_score_report, ScoreReportRow};
pub use router::catalog_router;
pub use scans::{acknowledge_scan, ScanAcknowledgement, ScanEvent};
pub use service::{ScoreBadge, ScoreRecomputation, ScoreService, ScoreServiceError};
