//! Green score engine and product provenance services.

pub mod catalog;
pub mod config;
pub mod error;
pub mod issuance;
pub mod scoring;
pub mod telemetry;
