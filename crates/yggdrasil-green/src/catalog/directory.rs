use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::domain::{Product, ProductId, ProductViolation};

/// Lookup abstraction over wherever product records live.
pub trait ProductDirectory: Send + Sync {
    fn find_by_qr(&self, code: &str) -> Result<Option<Product>, DirectoryError>;
    fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DirectoryError>;
    fn all(&self) -> Result<Vec<Product>, DirectoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read product data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("product file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("product file {path} failed validation: {violation}")]
    InvalidRecord {
        path: PathBuf,
        violation: ProductViolation,
    },
    #[error("product directory unavailable: {0}")]
    Unavailable(String),
}

/// Directory of one-product-per-file JSON documents.
///
/// The directory is re-read on every lookup. A missing directory is an empty catalog.
#[derive(Debug, Clone)]
pub struct JsonProductDirectory {
    root: PathBuf,
}

impl JsonProductDirectory {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn product_files(&self) -> Result<Vec<PathBuf>, DirectoryError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %self.root.display(), "product data directory missing");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(DirectoryError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DirectoryError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_product(path: &Path) -> Result<Product, DirectoryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let product: Product =
            serde_json::from_str(&raw).map_err(|source| DirectoryError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        product
            .validate()
            .map_err(|violation| DirectoryError::InvalidRecord {
                path: path.to_path_buf(),
                violation,
            })?;
        Ok(product)
    }

    fn find<F>(&self, predicate: F) -> Result<Option<Product>, DirectoryError>
    where
        F: Fn(&Product) -> bool,
    {
        for path in self.product_files()? {
            let product = Self::read_product(&path)?;
            if predicate(&product) {
                debug!(path = %path.display(), product_id = %product.id.0, "product matched");
                return Ok(Some(product));
            }
        }
        Ok(None)
    }
}

impl ProductDirectory for JsonProductDirectory {
    fn find_by_qr(&self, code: &str) -> Result<Option<Product>, DirectoryError> {
        self.find(|product| product.qr_code == code)
    }

    fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DirectoryError> {
        self.find(|product| &product.id == id)
    }

    fn all(&self) -> Result<Vec<Product>, DirectoryError> {
        self.product_files()?
            .iter()
            .map(|path| Self::read_product(path))
            .collect()
    }
}
