use std::marker::PhantomData;

use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_transport::Transport;
use async_trait::async_trait;
use defi_abi::IERC20;
use eyre::Result;

/// Balance reads on one chain.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    async fn native_balance(&self, account: Address) -> Result<U256>;

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256>;

    async fn token_decimals(&self, token: Address) -> Result<u8>;
}

pub struct AlloyBalanceReader<P, T> {
    provider: P,
    _t: PhantomData<T>,
}

impl<P, T> AlloyBalanceReader<P, T>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Send + Sync + Clone + 'static,
{
    pub fn new(provider: P) -> Self {
        Self { provider, _t: PhantomData }
    }
}

#[async_trait]
impl<P, T> BalanceReader for AlloyBalanceReader<P, T>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Send + Sync + Clone + 'static,
{
    async fn native_balance(&self, account: Address) -> Result<U256> {
        Ok(self.provider.get_balance(account).await?)
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256> {
        let erc20 = IERC20::IERC20Instance::new(token, self.provider.clone());
        Ok(erc20.balanceOf(owner).call().await?._0)
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        let erc20 = IERC20::IERC20Instance::new(token, self.provider.clone());
        Ok(erc20.decimals().call().await?._0)
    }
}
