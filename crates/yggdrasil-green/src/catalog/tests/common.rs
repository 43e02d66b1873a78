use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::catalog::directory::{DirectoryError, ProductDirectory};
use crate::catalog::domain::{Product, ProductCategory, ProductId};
use crate::catalog::service::ScoreService;
use crate::catalog::{catalog_router, ClaimType};
use crate::scoring::{
    LifecycleStage, LifecycleStageKind, ScoringConfig, StaticScoringConfigStore, ValidationMode,
};

pub(super) fn stage(kind: LifecycleStageKind, score: Option<f64>, carbon: Option<f64>) -> LifecycleStage {
    LifecycleStage::new(kind, kind.as_str()).with_metrics(score, carbon)
}

pub(super) fn tee() -> Product {
    Product {
        id: ProductId("prod-001".to_string()),
        qr_code: "YGG-TSHIRT-001".to_string(),
        name: "Organic Cotton Tee".to_string(),
        brand: "Yggdrasil Apparel".to_string(),
        category: ProductCategory::Fashion,
        description: "GOTS certified cotton t-shirt".to_string(),
        model_url: "/models/tshirt.glb".to_string(),
        image_url: None,
        green_score: 78.0,
        carbon_kg: 5.12,
        scoring_version: "v1.0".to_string(),
        lifecycle_stages: vec![
            stage(LifecycleStageKind::Materials, Some(80.0), Some(2.111)),
            stage(LifecycleStageKind::Production, Some(70.0), Some(3.004)),
            stage(LifecycleStageKind::Transport, Some(60.0), None),
            LifecycleStage::new(LifecycleStageKind::Use, "Wash cold"),
            stage(LifecycleStageKind::EndOfLife, Some(90.0), Some(0.0)),
        ],
        claims: vec![crate::catalog::Claim {
            claim_type: ClaimType::Certification,
            value: "GOTS".to_string(),
            verified: true,
            verifier: Some("Control Union".to_string()),
            evidence_url: None,
            issued_date: None,
        }],
        blockchain: None,
        metadata: None,
    }
}

pub(super) fn bare_cup() -> Product {
    Product {
        id: ProductId("prod-002".to_string()),
        qr_code: "YGG-CUP-002".to_string(),
        name: "Reusable Cup".to_string(),
        brand: "Yggdrasil Home".to_string(),
        category: ProductCategory::Packaging,
        description: "Bamboo fibre cup".to_string(),
        model_url: "/models/cup.glb".to_string(),
        image_url: None,
        green_score: 91.0,
        carbon_kg: 0.0,
        scoring_version: "v0.9".to_string(),
        lifecycle_stages: Vec::new(),
        claims: Vec::new(),
        blockchain: None,
        metadata: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    products: Arc<Mutex<Vec<Product>>>,
}

impl MemoryDirectory {
    pub(super) fn with(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
        }
    }
}

impl ProductDirectory for MemoryDirectory {
    fn find_by_qr(&self, code: &str) -> Result<Option<Product>, DirectoryError> {
        let guard = self.products.lock().expect("directory mutex");
        Ok(guard.iter().find(|product| product.qr_code == code).cloned())
    }

    fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DirectoryError> {
        let guard = self.products.lock().expect("directory mutex");
        Ok(guard.iter().find(|product| &product.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<Product>, DirectoryError> {
        Ok(self.products.lock().expect("directory mutex").clone())
    }
}

pub(super) struct UnavailableDirectory;

impl ProductDirectory for UnavailableDirectory {
    fn find_by_qr(&self, _code: &str) -> Result<Option<Product>, DirectoryError> {
        Err(DirectoryError::Unavailable("disk offline".to_string()))
    }

    fn find_by_id(&self, _id: &ProductId) -> Result<Option<Product>, DirectoryError> {
        Err(DirectoryError::Unavailable("disk offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Product>, DirectoryError> {
        Err(DirectoryError::Unavailable("disk offline".to_string()))
    }
}

pub(super) fn standard_store() -> StaticScoringConfigStore {
    StaticScoringConfigStore::new(ScoringConfig::standard(), ValidationMode::Strict)
}

pub(super) fn build_service() -> ScoreService<MemoryDirectory, StaticScoringConfigStore> {
    ScoreService::new(
        Arc::new(MemoryDirectory::with(vec![tee(), bare_cup()])),
        Arc::new(standard_store()),
    )
}

pub(super) fn service_without_config() -> ScoreService<MemoryDirectory, StaticScoringConfigStore>
{
    ScoreService::new(
        Arc::new(MemoryDirectory::with(vec![tee()])),
        Arc::new(StaticScoringConfigStore::empty()),
    )
}

pub(super) fn router_with_service(
    service: ScoreService<MemoryDirectory, StaticScoringConfigStore>,
) -> axum::Router {
    catalog_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
