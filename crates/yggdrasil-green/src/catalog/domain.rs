use crate::scoring::LifecycleStage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for catalog products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Fashion,
    Packaging,
    Electronics,
    Food,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    Certification,
    CarbonNeutral,
    RecycledContent,
    RenewableEnergy,
    WaterSaved,
    Other,
}

/// Sustainability claim printed on a product, with optional third-party evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    pub value: String,
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<String>,
}

/// Pointer to an already minted certificate, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_nft_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_tx_hash: Option<String>,
    #[serde(default = "default_network")]
    pub network: String,
}

fn default_network() -> String {
    "base-sepolia".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
}

/// Provenance record returned for a scanned code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub qr_code: String,
    pub name: String,
    pub brand: String,
    pub category: ProductCategory,
    pub description: String,
    pub model_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub green_score: f64,
    pub carbon_kg: f64,
    #[serde(default = "default_scoring_version")]
    pub scoring_version: String,
    pub lifecycle_stages: Vec<LifecycleStage>,
    #[serde(default)]
    pub claims: Vec<Claim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<BlockchainRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProductMetadata>,
}

fn default_scoring_version() -> String {
    "v1.0".to_string()
}

impl Product {
    /// Checks the stored score fields. Lifecycle metrics are not checked here; the scorer
    /// tolerates whatever the stages report.
    pub fn validate(&self) -> Result<(), ProductViolation> {
        if self.id.0.trim().is_empty() {
            return Err(ProductViolation::MissingId);
        }
        if !(0.0..=100.0).contains(&self.green_score) {
            return Err(ProductViolation::GreenScoreOutOfRange(self.green_score));
        }
        if self.carbon_kg.is_nan() || self.carbon_kg < 0.0 {
            return Err(ProductViolation::NegativeCarbon(self.carbon_kg));
        }
        Ok(())
    }

    pub fn verified_claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter().filter(|claim| claim.verified)
    }

    pub fn has_certificate(&self) -> bool {
        self.blockchain
            .as_ref()
            .and_then(|record| record.cert_nft_id.as_ref())
            .is_some()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductViolation {
    #[error("product id must not be empty")]
    MissingId,
    #[error("green_score {0} outside 0-100")]
    GreenScoreOutOfRange(f64),
    #[error("carbon_kg {0} must not be negative")]
    NegativeCarbon(f64),
}
