use std::collections::BTreeMap;
use std::sync::Arc;

use aggregator_client::{AggregatorClient, QuoteClient, DEFAULT_AGGREGATOR_URL, DEFAULT_QUOTE_URL};
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_transport::BoxTransport;
use balance_cache::{AlloyBalanceReader, Balances};
use defi_types::{ChainId, TokenInfo};
use eyre::{eyre, Result};
use swap_broadcast::{AlloyEvmClient, LocalTxSigner, StepTimeouts, SwapOrchestrator, SwapSigner};
use swap_rpc_state::AppState;
use tracing::{info, warn};
use url::Url;

use crate::{Secrets, TopologyConfig};

/// Services wired from configuration and environment secrets.
pub struct Topology {
    config: TopologyConfig,
    secrets: Secrets,
    providers: BTreeMap<ChainId, RootProvider<BoxTransport>>,
}

impl Topology {
    pub fn from(config: TopologyConfig) -> Result<Topology> {
        let secrets = Secrets::from_env(&config.secrets);
        Self::with_secrets(config, secrets)
    }

    pub fn with_secrets(config: TopologyConfig, secrets: Secrets) -> Result<Topology> {
        let mut providers = BTreeMap::new();

        for (name, chain) in config.chains.iter() {
            info!("Connecting to {name} chain_id={}", chain.chain_id);
            let url: Url = chain.url.parse().map_err(|e| eyre!("INVALID_RPC_URL {name} : {e}"))?;
            let provider = ProviderBuilder::new().on_http(url).boxed();
            providers.insert(chain.chain_id, provider);
        }

        if providers.is_empty() {
            return Err(eyre!("NO_CHAINS_CONFIGURED"));
        }

        if secrets.api_key.is_none() {
            warn!("{} is not set, swaps will fail", config.secrets.api_key_env);
        }
        if secrets.private_key.is_none() {
            warn!("{} is not set, swaps need a connected signer", config.secrets.private_key_env);
        }

        Ok(Topology { config, secrets, providers })
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    pub fn server_host(&self) -> String {
        self.config.server.host.clone()
    }

    pub fn display_address(&self) -> Address {
        self.config.display.address
    }

    pub fn tokens(&self) -> &[TokenInfo] {
        &self.config.tokens
    }

    pub fn chain_ids(&self) -> Vec<ChainId> {
        self.config.chain_ids()
    }

    pub fn get_provider(&self, chain_id: ChainId) -> Result<RootProvider<BoxTransport>> {
        self.providers.get(&chain_id).cloned().ok_or_else(|| eyre!("PROVIDER_NOT_FOUND {chain_id}"))
    }

    pub fn quote_client(&self) -> Result<QuoteClient> {
        let url: Url = self.config.quote.url.as_deref().unwrap_or(DEFAULT_QUOTE_URL).parse()?;
        Ok(QuoteClient::new(url, self.config.timeouts.quote()))
    }

    pub fn aggregator_client(&self) -> Result<AggregatorClient> {
        let url: Url = self.config.aggregator.url.as_deref().unwrap_or(DEFAULT_AGGREGATOR_URL).parse()?;
        Ok(AggregatorClient::new(url, self.secrets.api_key.clone(), self.config.timeouts.aggregator()))
    }

    /// Signer built from the private key secret, `None` when the secret is absent.
    pub fn fallback_signer(&self) -> Result<Option<Arc<dyn SwapSigner>>> {
        match self.secrets.private_key.as_deref() {
            Some(key) => {
                let signer = LocalTxSigner::from_hex(key)?;
                info!("Fallback signer {}", signer.address());
                Ok(Some(Arc::new(signer)))
            }
            None => Ok(None),
        }
    }

    pub fn orchestrator(&self) -> Result<SwapOrchestrator> {
        let timeouts = StepTimeouts {
            aggregator: self.config.timeouts.aggregator(),
            gas_estimation: self.config.timeouts.gas_estimation(),
            broadcast: self.config.timeouts.broadcast(),
        };
        let mut orchestrator =
            SwapOrchestrator::new(self.aggregator_client()?).with_fallback_signer(self.fallback_signer()?).with_timeouts(timeouts);
        for (chain_id, provider) in self.providers.iter() {
            orchestrator = orchestrator.with_client(*chain_id, Arc::new(AlloyEvmClient::<_, BoxTransport>::new(provider.clone())));
        }
        Ok(orchestrator)
    }

    pub fn balances(&self) -> Balances {
        let mut balances = Balances::new(self.display_address(), self.config.tokens.clone());
        for chain_id in self.chain_ids() {
            if let Some(provider) = self.providers.get(&chain_id) {
                balances = balances.with_chain(chain_id, Arc::new(AlloyBalanceReader::<_, BoxTransport>::new(provider.clone())));
            }
        }
        balances
    }

    pub fn app_state(&self) -> Result<AppState> {
        Ok(AppState::new(self.quote_client()?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::{address, U256};
    use defi_types::{SwapActionRequest, SwapError};

    const CONFIG: &str = r#"
[display]
address = "0x108e41248841d0c0d2303222324fF21C3ca88d73"

[chains.base_sepolia]
chain_id = 84532
url = "http://127.0.0.1:1"

[chains.arbitrum_sepolia]
chain_id = 421614
url = "http://127.0.0.1:2"

[[tokens]]
address = "0x036CbD53842c5426634e7929541eC2318f3dCF7e"
symbol = "USDC"
"#;

    const TEST_KEY: &str = "0x507485ea5bcf6864596cb51b2e727bb2d8ed5e64bb4f3d8c77a734d2fd610c6e";

    fn topology(secrets: Secrets) -> Topology {
        Topology::with_secrets(toml::from_str(CONFIG).unwrap(), secrets).unwrap()
    }

    #[test]
    fn test_clients_from_defaults() -> Result<()> {
        let topology = topology(Secrets { api_key: Some("key".to_string()), private_key: None });

        assert_eq!(topology.aggregator_client()?.url().as_str(), "https://api-v2.swaps.xyz/");
        assert!(topology.get_provider(84532).is_ok());
        assert!(topology.get_provider(1).is_err());
        assert_eq!(topology.server_host(), "127.0.0.1:3000");
        Ok(())
    }

    #[test]
    fn test_balances_cover_configured_chains() {
        let balances = topology(Secrets::default()).balances();

        assert_eq!(balances.chains(), &[421614, 84532]);
        assert_eq!(balances.keys_for_chain(84532).len(), 3);
    }

    #[test]
    fn test_fallback_signer() -> Result<()> {
        let signer = topology(Secrets { api_key: None, private_key: Some(TEST_KEY.to_string()) }).fallback_signer()?;
        assert_eq!(signer.map(|s| s.address()), Some(address!("16Df4b25e4E37A9116eb224799c1e0Fb17fd8d30")));

        assert!(topology(Secrets::default()).fallback_signer()?.is_none());
        assert!(topology(Secrets { api_key: None, private_key: Some("0x1234".to_string()) }).orchestrator().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_private_key_fails_only_the_swap() -> Result<()> {
        let orchestrator = topology(Secrets { api_key: Some("key".to_string()), private_key: None }).orchestrator()?;
        let request = SwapActionRequest::exact_in(
            address!("108e41248841d0c0d2303222324fF21C3ca88d73"),
            address!("036CbD53842c5426634e7929541eC2318f3dCF7e"),
            84532,
            address!("2b2C81e08f1Af8835a78Bb2A90AE924ACE0eA4bE"),
            421614,
            U256::from(1_000_000u64),
        );

        let err = orchestrator.broadcast(&request, None).await.unwrap_err();
        assert!(matches!(err, SwapError::Config(_)));
        Ok(())
    }

    #[test]
    fn test_no_chains_is_error() {
        let config: TopologyConfig =
            toml::from_str("[display]\naddress = \"0x108e41248841d0c0d2303222324fF21C3ca88d73\"\n[chains]\n").unwrap();
        assert!(Topology::with_secrets(config, Secrets::default()).is_err());
    }
}
