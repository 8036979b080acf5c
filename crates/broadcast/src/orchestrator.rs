use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use aggregator_client::AggregatorClient;
use defi_types::{ChainId, SwapActionRequest, SwapError, SwapResult};
use tracing::{error, info};

use crate::in_flight::InFlightGuard;
use crate::{EvmClient, SwapSigner};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepTimeouts {
    pub aggregator: Duration,
    pub gas_estimation: Duration,
    pub broadcast: Duration,
}

impl Default for StepTimeouts {
    fn default() -> Self {
        Self { aggregator: Duration::from_secs(30), gas_estimation: Duration::from_secs(30), broadcast: Duration::from_secs(60) }
    }
}

async fn with_timeout<F, T>(duration: Duration, step: &'static str, fut: F) -> Result<T, SwapError>
where
    F: Future<Output = Result<T, SwapError>>,
{
    tokio::time::timeout(duration, fut).await.map_err(|_| SwapError::Timeout(step))?
}

/// Resolves a swap through the aggregator and pushes the resulting transaction on chain.
///
/// One orchestrator serves one session: a second `broadcast` while another is running is
/// rejected with [`SwapError::SwapInFlight`].
pub struct SwapOrchestrator {
    aggregator: AggregatorClient,
    clients: HashMap<ChainId, Arc<dyn EvmClient>>,
    fallback_signer: Option<Arc<dyn SwapSigner>>,
    timeouts: StepTimeouts,
    in_flight: Arc<AtomicBool>,
}

impl SwapOrchestrator {
    pub fn new(aggregator: AggregatorClient) -> Self {
        Self {
            aggregator,
            clients: HashMap::new(),
            fallback_signer: None,
            timeouts: StepTimeouts::default(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_client(mut self, chain_id: ChainId, client: Arc<dyn EvmClient>) -> Self {
        self.clients.insert(chain_id, client);
        self
    }

    pub fn with_fallback_signer(self, signer: Option<Arc<dyn SwapSigner>>) -> Self {
        Self { fallback_signer: signer, ..self }
    }

    pub fn with_timeouts(self, timeouts: StepTimeouts) -> Self {
        Self { timeouts, ..self }
    }

    pub fn fallback_signer(&self) -> Option<&Arc<dyn SwapSigner>> {
        self.fallback_signer.as_ref()
    }

    fn client(&self, chain_id: ChainId) -> Result<&Arc<dyn EvmClient>, SwapError> {
        self.clients.get(&chain_id).ok_or_else(|| SwapError::Config(format!("no rpc client configured for chain {chain_id}")))
    }

    /// Runs getAction, gas estimation and submission in that order.
    ///
    /// `signer` overrides the configured fallback account. The request is not validated
    /// here; callers wanting `amount > 0` or distinct chains use [`SwapActionRequest::validate`].
    pub async fn broadcast(&self, request: &SwapActionRequest, signer: Option<Arc<dyn SwapSigner>>) -> Result<SwapResult, SwapError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let signer = signer
            .or_else(|| self.fallback_signer.clone())
            .ok_or_else(|| SwapError::Config("no signing account: fallback private key is not configured".to_string()))?;

        info!(
            "Swap request {} -> {} amount={} sender={}",
            request.src_chain_id, request.dst_chain_id, request.amount, request.sender
        );

        let response = with_timeout(self.timeouts.aggregator, "aggregator", async {
            self.aggregator.get_action(request).await.map_err(SwapError::from)
        })
        .await?;
        let route = response.into_route().map_err(|e| {
            error!("Aggregator rejected swap: {e}");
            e
        })?;

        let chain_id = route.tx.chain_id_or(request.src_chain_id);
        let client = self.client(chain_id)?;
        let mut tx_request = route.tx.to_transaction_request(signer.address(), chain_id);

        let gas = with_timeout(self.timeouts.gas_estimation, "gas estimation", async {
            client.estimate_gas(&tx_request).await.map_err(|e| SwapError::GasEstimation(e.to_string()))
        })
        .await?;
        info!("Gas estimated chain={chain_id} gas={gas}");
        tx_request.gas = Some(gas);

        let tx_hash = with_timeout(self.timeouts.broadcast, "broadcast", async {
            client.send_transaction(tx_request, signer.as_ref()).await.map_err(|e| SwapError::Broadcast(e.to_string()))
        })
        .await?;
        info!("Swap broadcast chain={chain_id} tx_hash={tx_hash}");

        Ok(SwapResult { tx_hash, tx: route.tx.with_gas(gas), gas, route_metadata: route.route_metadata })
    }
}
