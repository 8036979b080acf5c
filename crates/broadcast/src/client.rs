use std::marker::PhantomData;

use alloy_eips::eip2718::Encodable2718;
use alloy_network::Ethereum;
use alloy_primitives::TxHash;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_transport::Transport;
use async_trait::async_trait;
use eyre::Result;
use tracing::{debug, info};

use crate::SwapSigner;

/// Gas estimation and raw transaction submission on one chain.
#[async_trait]
pub trait EvmClient: Send + Sync {
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64>;

    /// Fills nonce and fees, signs with `signer` and submits the raw transaction.
    async fn send_transaction(&self, tx: TransactionRequest, signer: &dyn SwapSigner) -> Result<TxHash>;
}

pub struct AlloyEvmClient<P, T> {
    provider: P,
    _t: PhantomData<T>,
}

impl<P, T> AlloyEvmClient<P, T>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Send + Sync + Clone + 'static,
{
    pub fn new(provider: P) -> Self {
        Self { provider, _t: PhantomData }
    }
}

#[async_trait]
impl<P, T> EvmClient for AlloyEvmClient<P, T>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Send + Sync + Clone + 'static,
{
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        let gas = self.provider.estimate_gas(tx).await?;
        debug!("Estimated gas {gas}");
        Ok(gas)
    }

    async fn send_transaction(&self, mut tx: TransactionRequest, signer: &dyn SwapSigner) -> Result<TxHash> {
        let nonce = self.provider.get_transaction_count(signer.address()).await?;
        let fees = self.provider.estimate_eip1559_fees(None).await?;

        tx.from = Some(signer.address());
        tx.nonce = Some(nonce);
        tx.transaction_type = Some(2);
        tx.gas_price = None;
        tx.max_fee_per_gas = Some(fees.max_fee_per_gas);
        tx.max_priority_fee_per_gas = Some(fees.max_priority_fee_per_gas);

        let envelope = signer.sign(tx).await?;
        let pending = self.provider.send_raw_transaction(&envelope.encoded_2718()).await?;
        let tx_hash = *pending.tx_hash();
        info!("Transaction sent {tx_hash} nonce={nonce}");
        Ok(tx_hash)
    }
}
