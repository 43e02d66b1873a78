use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{
    CertificateMint, ChainNetwork, IssuanceTicket, MintCertificateRequest, RewardRequest,
    RewardTransfer,
};
use super::prepare::{prepare_certificate, prepare_reward, RequestViolation};

/// Outbound hook to whatever signs and broadcasts transactions. The core hands over
/// validated requests and never sees keys, nonces or gas prices.
pub trait ChainGateway: Send + Sync {
    fn submit_certificate(&self, mint: &CertificateMint) -> Result<IssuanceTicket, GatewayError>;
    fn submit_reward(&self, reward: &RewardTransfer) -> Result<IssuanceTicket, GatewayError>;
}

/// Chain client failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no signer configured for {0}")]
    SignerMissing(ChainNetwork),
    #[error("chain client unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificateIssuance {
    pub mint: CertificateMint,
    pub ticket: IssuanceTicket,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewardIssuance {
    pub reward: RewardTransfer,
    pub ticket: IssuanceTicket,
}

/// Validates issuance requests and forwards them to the chain gateway.
pub struct IssuanceService<G> {
    gateway: Arc<G>,
    network: ChainNetwork,
}

impl<G> IssuanceService<G>
where
    G: ChainGateway + 'static,
{
    pub fn new(gateway: Arc<G>, network: ChainNetwork) -> Self {
        Self { gateway, network }
    }

    pub fn network(&self) -> ChainNetwork {
        self.network
    }

    pub fn mint_certificate(
        &self,
        request: MintCertificateRequest,
    ) -> Result<CertificateIssuance, IssuanceError> {
        let mint = prepare_certificate(request)?;
        let ticket = self.gateway.submit_certificate(&mint)?;

        info!(
            product_id = %mint.product_id,
            recipient = %mint.recipient.shortened(),
            network = %self.network,
            "certificate mint queued"
        );
        Ok(CertificateIssuance { mint, ticket })
    }

    pub fn reward(&self, request: RewardRequest) -> Result<RewardIssuance, IssuanceError> {
        let reward = prepare_reward(request)?;
        let ticket = self.gateway.submit_reward(&reward)?;

        info!(
            recipient = %reward.recipient.shortened(),
            amount = %reward.amount.to_decimal_string(),
            network = %self.network,
            "token reward queued"
        );
        Ok(RewardIssuance { reward, ticket })
    }
}

/// Error raised by the issuance service.
#[derive(Debug, thiserror::Error)]
pub enum IssuanceError {
    #[error(transparent)]
    Invalid(#[from] RequestViolation),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
