use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info};
use yggdrasil_green::issuance::{
    CertificateMint, ChainGateway, ChainNetwork, GatewayError, IssuanceTicket, RewardTransfer,
};

/// Requests waiting for the signer before new ones are turned away.
pub(crate) const SIGNER_QUEUE_CAPACITY: usize = 256;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Request accepted by the queued gateway, held until the signer side receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueuedSubmission {
    Certificate(CertificateMint),
    Reward(RewardTransfer),
}

/// Chain gateway that hands validated requests to a bounded channel. Signing and
/// broadcast happen on the receiving side, so every ticket comes back pending without
/// a tx hash. A full or closed channel is reported as an unavailable gateway.
#[derive(Clone)]
pub(crate) struct QueuedChainGateway {
    network: ChainNetwork,
    rpc_url: String,
    sender: mpsc::Sender<QueuedSubmission>,
}

impl QueuedChainGateway {
    pub(crate) fn new(
        network: ChainNetwork,
        rpc_url: impl Into<String>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<QueuedSubmission>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let gateway = Self {
            network,
            rpc_url: rpc_url.into(),
            sender,
        };
        (gateway, receiver)
    }

    fn enqueue(&self, submission: QueuedSubmission) -> Result<usize, GatewayError> {
        self.sender.try_send(submission).map_err(|err| match err {
            TrySendError::Full(_) => GatewayError::Unavailable("signer queue full".to_string()),
            TrySendError::Closed(_) => {
                GatewayError::Unavailable("signer queue closed".to_string())
            }
        })?;
        Ok(self.sender.max_capacity() - self.sender.capacity())
    }
}

impl ChainGateway for QueuedChainGateway {
    fn submit_certificate(&self, mint: &CertificateMint) -> Result<IssuanceTicket, GatewayError> {
        let depth = self.enqueue(QueuedSubmission::Certificate(mint.clone()))?;
        debug!(
            product_id = %mint.product_id,
            rpc_url = %self.rpc_url,
            depth,
            "certificate mint handed to signer queue"
        );
        Ok(IssuanceTicket::pending(self.network, "2-5 minutes"))
    }

    fn submit_reward(&self, reward: &RewardTransfer) -> Result<IssuanceTicket, GatewayError> {
        let depth = self.enqueue(QueuedSubmission::Reward(reward.clone()))?;
        debug!(
            recipient = %reward.recipient.shortened(),
            rpc_url = %self.rpc_url,
            depth,
            "reward transfer handed to signer queue"
        );
        Ok(IssuanceTicket::pending(self.network, "1-3 minutes"))
    }
}

/// Signer-side consumer. No signer is wired into this process, so submissions are
/// recorded in the log and released. Returns how many were drained once every sender
/// is gone.
pub(crate) async fn drain_submissions(mut receiver: mpsc::Receiver<QueuedSubmission>) -> usize {
    let mut drained = 0;
    while let Some(submission) = receiver.recv().await {
        drained += 1;
        match submission {
            QueuedSubmission::Certificate(mint) => info!(
                contract = mint.contract,
                product_id = %mint.product_id,
                recipient = %mint.recipient.shortened(),
                gas_limit = mint.gas_limit,
                "certificate mint awaiting external signer"
            ),
            QueuedSubmission::Reward(reward) => info!(
                contract = reward.contract,
                recipient = %reward.recipient.shortened(),
                amount = %reward.amount.to_decimal_string(),
                gas_limit = reward.gas_limit,
                "reward transfer awaiting external signer"
            ),
        }
    }
    drained
}
