use crate::catalog::{DirectoryError, ScoreServiceError};
use crate::config::ConfigError;
use crate::issuance::IssuanceError;
use crate::scoring::ScoringConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Scoring(ScoringConfigError),
    Catalog(ScoreServiceError),
    Issuance(IssuanceError),
    Report(csv::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Issuance(err) => write!(f, "issuance error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Issuance(err) => Some(err),
            AppError::Report(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Catalog(
                ScoreServiceError::ProductNotFound(_) | ScoreServiceError::QrCodeNotFound(_),
            ) => StatusCode::NOT_FOUND,
            AppError::Issuance(IssuanceError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Issuance(IssuanceError::Gateway(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Scoring(_)
            | AppError::Catalog(_)
            | AppError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let payload = match &self {
            AppError::Catalog(ScoreServiceError::QrCodeNotFound(code)) => json!({
                "error": "Product not found",
                "code": code,
            }),
            AppError::Catalog(ScoreServiceError::ProductNotFound(id)) => json!({
                "error": format!("Product '{id}' not found"),
                "product_id": id,
            }),
            AppError::Catalog(ScoreServiceError::Scoring(err)) | AppError::Scoring(err) => {
                error!(error = %err, "scoring config unavailable");
                json!({ "error": err.to_string() })
            }
            AppError::Catalog(ScoreServiceError::Directory(err)) => {
                warn!(error = %err, "product directory failure");
                json!({ "error": err.to_string() })
            }
            AppError::Issuance(IssuanceError::Gateway(err)) => {
                warn!(error = %err, "chain gateway rejected request");
                json!({ "error": err.to_string() })
            }
            AppError::Issuance(IssuanceError::Invalid(violation)) => {
                json!({ "error": violation.to_string() })
            }
            other => {
                error!(error = %other, "request failed");
                json!({ "error": other.to_string() })
            }
        };
        (status, Json(payload)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ScoringConfigError> for AppError {
    fn from(value: ScoringConfigError) -> Self {
        Self::Scoring(value)
    }
}

impl From<ScoreServiceError> for AppError {
    fn from(value: ScoreServiceError) -> Self {
        Self::Catalog(value)
    }
}

impl From<DirectoryError> for AppError {
    fn from(value: DirectoryError) -> Self {
        Self::Catalog(ScoreServiceError::Directory(value))
    }
}

impl From<IssuanceError> for AppError {
    fn from(value: IssuanceError) -> Self {
        Self::Issuance(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Report(value)
    }
}
