use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::ProductId;

pub const CERTIFICATE_CONTRACT: &str = "GreenCertNFT";
pub const REWARD_CONTRACT: &str = "GreenLeafToken";
pub const CERTIFICATE_GAS_LIMIT: u64 = 200_000;
pub const REWARD_GAS_LIMIT: u64 = 150_000;
/// Reward token precision.
pub const TOKEN_DECIMALS: u32 = 18;

/// Test networks the issuance contracts are deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainNetwork {
    #[default]
    BaseSepolia,
    Sepolia,
}

impl ChainNetwork {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "base-sepolia" | "base_sepolia" => Some(Self::BaseSepolia),
            "sepolia" => Some(Self::Sepolia),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainNetwork::BaseSepolia => "base-sepolia",
            ChainNetwork::Sepolia => "sepolia",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            ChainNetwork::BaseSepolia => 84_532,
            ChainNetwork::Sepolia => 11_155_111,
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            ChainNetwork::BaseSepolia => "https://sepolia.base.org",
            ChainNetwork::Sepolia => "https://rpc.sepolia.org",
        }
    }

    fn explorer_base(&self) -> &'static str {
        match self {
            ChainNetwork::BaseSepolia => "https://sepolia.basescan.org",
            ChainNetwork::Sepolia => "https://sepolia.etherscan.io",
        }
    }

    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_base(), tx_hash)
    }

    pub fn explorer_address_url(&self, address: &EvmAddress) -> String {
        format!("{}/address/{}", self.explorer_base(), address)
    }
}

impl fmt::Display for ChainNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased `0x`-prefixed 20 byte account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EvmAddress(String);

impl EvmAddress {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))?;
        if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234...abcd` form for logs and UI.
    pub fn shortened(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token quantity in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub fn from_base_units(units: u128) -> Self {
        Self(units)
    }

    pub fn base_units(&self) -> u128 {
        self.0
    }

    /// Whole-token rendering with trailing zeros trimmed, e.g. `1.5`.
    pub fn to_decimal_string(&self) -> String {
        let scale = 10u128.pow(TOKEN_DECIMALS);
        let whole = self.0 / scale;
        let fraction = self.0 % scale;
        if fraction == 0 {
            return whole.to_string();
        }
        let fraction = format!("{:0width$}", fraction, width = TOKEN_DECIMALS as usize);
        format!("{}.{}", whole, fraction.trim_end_matches('0'))
    }
}

/// Inbound request to mint a certificate for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintCertificateRequest {
    pub product_id: String,
    pub recipient_address: String,
    #[serde(default)]
    pub metadata_uri: Option<String>,
}

/// Inbound request to reward a user with tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRequest {
    pub recipient_address: String,
    pub amount: f64,
    pub reason: String,
}

/// Validated certificate mint, ready for the chain client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateMint {
    pub contract: &'static str,
    pub product_id: ProductId,
    pub recipient: EvmAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_uri: Option<String>,
    pub gas_limit: u64,
}

/// Validated reward transfer, ready for the chain client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardTransfer {
    pub contract: &'static str,
    pub recipient: EvmAddress,
    pub amount: TokenAmount,
    pub reason: String,
    pub gas_limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuanceStatus {
    Pending,
    Submitted,
}

/// What the chain client reports back after accepting a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuanceTicket {
    pub status: IssuanceStatus,
    pub network: ChainNetwork,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    pub estimated_time: String,
}

impl IssuanceTicket {
    pub fn pending(network: ChainNetwork, estimated_time: impl Into<String>) -> Self {
        Self {
            status: IssuanceStatus::Pending,
            network,
            tx_hash: None,
            estimated_time: estimated_time.into(),
        }
    }

    pub fn explorer_url(&self) -> Option<String> {
        self.tx_hash
            .as_deref()
            .map(|hash| self.network.explorer_tx_url(hash))
    }
}
