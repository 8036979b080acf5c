use std::fmt;

use alloy_consensus::{SignableTransaction, TxEnvelope};
use alloy_network::TxSigner as AlloyTxSigner;
use alloy_primitives::{Address, B256};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use eyre::{eyre, OptionExt, Result};

/// Account able to sign a swap transaction.
#[async_trait]
pub trait SwapSigner: Send + Sync + fmt::Debug {
    fn address(&self) -> Address;

    async fn sign(&self, tx: TransactionRequest) -> Result<TxEnvelope>;
}

/// Signer backed by a private key held in process memory.
#[derive(Clone)]
pub struct LocalTxSigner {
    address: Address,
    wallet: PrivateKeySigner,
}

impl fmt::Debug for LocalTxSigner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LocalTxSigner").field("address", &self.address.to_string()).finish()
    }
}

impl LocalTxSigner {
    pub fn new(wallet: PrivateKeySigner) -> Self {
        Self { address: wallet.address(), wallet }
    }

    /// Hex private key, with or without `0x`.
    pub fn from_hex(priv_key: &str) -> Result<Self> {
        let key: B256 = priv_key.trim().parse().map_err(|_| eyre!("INVALID_PRIVATE_KEY"))?;
        let wallet = PrivateKeySigner::from_bytes(&key)?;
        Ok(Self::new(wallet))
    }
}

#[async_trait]
impl SwapSigner for LocalTxSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign(&self, tx_req: TransactionRequest) -> Result<TxEnvelope> {
        let mut typed_tx = tx_req
            .build_typed_tx()
            .map_err(|_| eyre!("TRANSACTION_IS_INCOMPLETE"))?
            .eip1559()
            .ok_or_eyre("TRANSACTION_IS_NOT_EIP1559")?
            .clone();
        let signature = self.wallet.sign_transaction(&mut typed_tx).await?;
        let signed_tx = typed_tx.into_signed(signature);
        Ok(signed_tx.into())
    }
}
