use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use super::domain::{MintCertificateRequest, RewardRequest};
use super::service::{ChainGateway, IssuanceService};
use crate::error::AppError;

/// Router builder exposing certificate mint and token reward intake.
pub fn issuance_router<G>(service: Arc<IssuanceService<G>>) -> Router
where
    G: ChainGateway + 'static,
{
    Router::new()
        .route("/blockchain/mint-cert", post(mint_certificate_handler::<G>))
        .route("/blockchain/reward", post(reward_handler::<G>))
        .with_state(service)
}

pub(crate) async fn mint_certificate_handler<G>(
    State(service): State<Arc<IssuanceService<G>>>,
    Json(request): Json<MintCertificateRequest>,
) -> Result<(StatusCode, Json<Value>), AppError>
where
    G: ChainGateway + 'static,
{
    let issuance = service.mint_certificate(request)?;
    let payload = json!({
        "status": issuance.ticket.status,
        "product_id": issuance.mint.product_id,
        "recipient": issuance.mint.recipient,
        "network": issuance.ticket.network,
        "tx_hash": issuance.ticket.tx_hash,
        "explorer_url": issuance.ticket.explorer_url(),
        "message": "Certificate minting queued (testnet). Check back later for tx_hash.",
        "estimated_time": issuance.ticket.estimated_time,
    });
    Ok((StatusCode::ACCEPTED, Json(payload)))
}

pub(crate) async fn reward_handler<G>(
    State(service): State<Arc<IssuanceService<G>>>,
    Json(request): Json<RewardRequest>,
) -> Result<(StatusCode, Json<Value>), AppError>
where
    G: ChainGateway + 'static,
{
    let issuance = service.reward(request)?;
    let amount = issuance.reward.amount.to_decimal_string();
    let payload = json!({
        "status": issuance.ticket.status,
        "recipient": issuance.reward.recipient,
        "amount": amount,
        "amount_base_units": issuance.reward.amount.base_units().to_string(),
        "reason": issuance.reward.reason,
        "network": issuance.ticket.network,
        "message": format!("Reward of {amount} GreenLeaf tokens queued."),
        "estimated_time": issuance.ticket.estimated_time,
    });
    Ok((StatusCode::ACCEPTED, Json(payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuance::domain::{
        CertificateMint, ChainNetwork, IssuanceTicket, RewardTransfer,
    };
    use crate::issuance::service::GatewayError;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    struct PendingGateway;

    impl ChainGateway for PendingGateway {
        fn submit_certificate(
            &self,
            _mint: &CertificateMint,
        ) -> Result<IssuanceTicket, GatewayError> {
            Ok(IssuanceTicket::pending(ChainNetwork::BaseSepolia, "2-5 minutes"))
        }

        fn submit_reward(&self, _reward: &RewardTransfer) -> Result<IssuanceTicket, GatewayError> {
            Ok(IssuanceTicket::pending(ChainNetwork::BaseSepolia, "1-3 minutes"))
        }
    }

    fn router() -> Router {
        issuance_router(Arc::new(IssuanceService::new(
            Arc::new(PendingGateway),
            ChainNetwork::BaseSepolia,
        )))
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json payload"))
    }

    #[tokio::test]
    async fn mint_route_accepts_valid_request() {
        let (status, payload) = post_json(
            router(),
            "/blockchain/mint-cert",
            json!({
                "product_id": "prod-001",
                "recipient_address": "0x52908400098527886E0F7030069857D2E4169EE7"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(payload["status"], "pending");
        assert_eq!(payload["product_id"], "prod-001");
        assert_eq!(
            payload["recipient"],
            "0x52908400098527886e0f7030069857d2e4169ee7"
        );
        assert_eq!(payload["network"], "base-sepolia");
        assert_eq!(payload["estimated_time"], "2-5 minutes");
        assert!(payload["tx_hash"].is_null());
    }

    #[tokio::test]
    async fn mint_route_rejects_bad_recipient() {
        let (status, payload) = post_json(
            router(),
            "/blockchain/mint-cert",
            json!({
                "product_id": "prod-001",
                "recipient_address": "not-an-address"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(payload["error"]
            .as_str()
            .expect("error message")
            .contains("not-an-address"));
    }

    #[tokio::test]
    async fn reward_route_reports_amount() {
        let (status, payload) = post_json(
            router(),
            "/blockchain/reward",
            json!({
                "recipient_address": "0x52908400098527886E0F7030069857D2E4169EE7",
                "amount": 2.5,
                "reason": "Returned packaging"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(payload["amount"], "2.5");
        assert_eq!(payload["amount_base_units"], "2500000000000000000");
        assert_eq!(payload["message"], "Reward of 2.5 GreenLeaf tokens queued.");
    }

    #[tokio::test]
    async fn reward_route_rejects_zero_amount() {
        let (status, _) = post_json(
            router(),
            "/blockchain/reward",
            json!({
                "recipient_address": "0x52908400098527886E0F7030069857D2E4169EE7",
                "amount": 0,
                "reason": "Nothing"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    struct FullQueueGateway;

    impl ChainGateway for FullQueueGateway {
        fn submit_certificate(
            &self,
            _mint: &CertificateMint,
        ) -> Result<IssuanceTicket, GatewayError> {
            Err(GatewayError::Unavailable("signer queue full".to_string()))
        }

        fn submit_reward(&self, _reward: &RewardTransfer) -> Result<IssuanceTicket, GatewayError> {
            Err(GatewayError::Unavailable("signer queue full".to_string()))
        }
    }

    #[tokio::test]
    async fn unavailable_gateway_maps_to_service_unavailable() {
        let router = issuance_router(Arc::new(IssuanceService::new(
            Arc::new(FullQueueGateway),
            ChainNetwork::BaseSepolia,
        )));
        let (status, payload) = post_json(
            router,
            "/blockchain/mint-cert",
            json!({
                "product_id": "prod-001",
                "recipient_address": "0x52908400098527886E0F7030069857D2E4169EE7"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(payload["error"]
            .as_str()
            .expect("error message")
            .contains("signer queue full"));
    }
}
