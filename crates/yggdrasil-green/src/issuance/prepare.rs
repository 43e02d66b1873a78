use super::domain::{
    CertificateMint, EvmAddress, MintCertificateRequest, RewardRequest, RewardTransfer,
    TokenAmount, CERTIFICATE_CONTRACT, CERTIFICATE_GAS_LIMIT, REWARD_CONTRACT, REWARD_GAS_LIMIT,
    TOKEN_DECIMALS,
};
use crate::catalog::ProductId;

/// Reasons an issuance request is refused before it reaches the chain client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestViolation {
    #[error("product_id must not be empty")]
    MissingProductId,
    #[error("recipient address '{0}' is not a 0x-prefixed 20 byte hex address")]
    InvalidRecipient(String),
    #[error("reward amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),
    #[error("reward amount {0} has more than 18 decimal places")]
    AmountTooPrecise(String),
    #[error("reward amount {0} is too large")]
    AmountOverflow(String),
    #[error("reward reason must not be empty")]
    MissingReason,
}

pub fn prepare_certificate(
    request: MintCertificateRequest,
) -> Result<CertificateMint, RequestViolation> {
    let product_id = request.product_id.trim();
    if product_id.is_empty() {
        return Err(RequestViolation::MissingProductId);
    }
    let recipient = parse_recipient(&request.recipient_address)?;
    let metadata_uri = request
        .metadata_uri
        .map(|uri| uri.trim().to_string())
        .filter(|uri| !uri.is_empty());

    Ok(CertificateMint {
        contract: CERTIFICATE_CONTRACT,
        product_id: ProductId(product_id.to_string()),
        recipient,
        metadata_uri,
        gas_limit: CERTIFICATE_GAS_LIMIT,
    })
}

pub fn prepare_reward(request: RewardRequest) -> Result<RewardTransfer, RequestViolation> {
    let recipient = parse_recipient(&request.recipient_address)?;
    let amount = token_amount(request.amount)?;
    let reason = request.reason.trim();
    if reason.is_empty() {
        return Err(RequestViolation::MissingReason);
    }

    Ok(RewardTransfer {
        contract: REWARD_CONTRACT,
        recipient,
        amount,
        reason: reason.to_string(),
        gas_limit: REWARD_GAS_LIMIT,
    })
}

fn parse_recipient(raw: &str) -> Result<EvmAddress, RequestViolation> {
    EvmAddress::parse(raw).ok_or_else(|| RequestViolation::InvalidRecipient(raw.to_string()))
}

/// Converts a whole-token amount to base units using its shortest decimal form, so
/// `0.1` becomes exactly 10^17 rather than the nearest binary approximation.
pub fn token_amount(amount: f64) -> Result<TokenAmount, RequestViolation> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(RequestViolation::NonPositiveAmount(amount));
    }

    let rendered = amount.to_string();
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    if fraction.len() > TOKEN_DECIMALS as usize {
        return Err(RequestViolation::AmountTooPrecise(rendered));
    }

    let overflow = || RequestViolation::AmountOverflow(rendered.clone());
    let whole: u128 = whole.parse().map_err(|_| overflow())?;
    let padded = format!("{:0<width$}", fraction, width = TOKEN_DECIMALS as usize);
    let fraction: u128 = padded.parse().map_err(|_| overflow())?;

    let units = whole
        .checked_mul(10u128.pow(TOKEN_DECIMALS))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(overflow)?;
    Ok(TokenAmount::from_base_units(units))
}
