use crate::issuance::ChainNetwork;
use crate::scoring::ValidationMode;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringSettings,
    pub catalog: CatalogSettings,
    pub chain: ChainSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let config_path = env::var("SCORING_CONFIG_PATH")
            .unwrap_or_else(|_| "schemas/scoring_config.json".to_string());
        let validation_raw = env::var("SCORING_VALIDATION").unwrap_or_else(|_| "strict".to_string());
        let validation = ValidationMode::parse(&validation_raw)
            .ok_or(ConfigError::InvalidValidationMode(validation_raw))?;

        let data_dir = env::var("PRODUCT_DATA_DIR").unwrap_or_else(|_| "data".to_string());

        let network_raw = env::var("CHAIN_NETWORK").unwrap_or_else(|_| "base-sepolia".to_string());
        let network =
            ChainNetwork::parse(&network_raw).ok_or(ConfigError::UnknownNetwork(network_raw))?;
        let rpc_url = env::var("CHAIN_RPC_URL")
            .unwrap_or_else(|_| network.default_rpc_url().to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringSettings {
                config_path: PathBuf::from(config_path),
                validation,
            },
            catalog: CatalogSettings {
                data_dir: PathBuf::from(data_dir),
            },
            chain: ChainSettings { network, rpc_url },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the weight table lives and how strictly it is checked.
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub config_path: PathBuf,
    pub validation: ValidationMode,
}

/// Location of the product JSON records.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub data_dir: PathBuf,
}

/// Network the issuance contracts target. The RPC URL is handed to the chain client.
#[derive(Debug, Clone)]
pub struct ChainSettings {
    pub network: ChainNetwork,
    pub rpc_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValidationMode(String),
    UnknownNetwork(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValidationMode(value) => write!(
                f,
                "SCORING_VALIDATION must be 'strict' or 'relaxed', got '{}'",
                value
            ),
            ConfigError::UnknownNetwork(value) => write!(
                f,
                "CHAIN_NETWORK must be 'base-sepolia' or 'sepolia', got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidValidationMode(_)
            | ConfigError::UnknownNetwork(_) => None,
        }
    }
}
