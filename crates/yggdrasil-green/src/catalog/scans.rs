use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::ProductId;

/// A consumer scanning a product code. Scans are acknowledged and logged, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub product_id: ProductId,
    pub qr_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_wallet: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanAcknowledgement {
    pub status: &'static str,
    pub event: ScanEvent,
    pub message: &'static str,
}

pub fn acknowledge_scan(event: ScanEvent) -> ScanAcknowledgement {
    info!(
        product_id = %event.product_id,
        qr_code = %event.qr_code,
        wallet = event.user_wallet.is_some(),
        "scan event received"
    );

    ScanAcknowledgement {
        status: "logged",
        event,
        message: "Scan event recorded (not persisted)",
    }
}
