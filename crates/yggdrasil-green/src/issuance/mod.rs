//! Certificate and reward issuance requests. Requests are validated and prepared here;
//! signing and broadcast belong to the `ChainGateway` implementation.

pub mod domain;
mod prepare;
pub mod router;
mod service;

pub use domain::{
    CertificateMint, ChainNetwork, EvmAddress, IssuanceStatus, IssuanceTicket,
    MintCertificateRequest, RewardRequest, RewardTransfer, TokenAmount,
};
pub use prepare::{prepare_certificate, prepare_reward, token_amount, RequestViolation};
pub use router::issuance_router;
pub use service::{
    CertificateIssuance, ChainGateway, GatewayError, IssuanceError, IssuanceService,
    RewardIssuance,
};
