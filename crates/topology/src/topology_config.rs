use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

use alloy_primitives::Address;
use defi_types::{ChainId, TokenInfo};
use eyre::Result;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
}

impl ServerConfig {
    fn default_host() -> String {
        "127.0.0.1:3000".to_string()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: Self::default_host() }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AggregatorConfig {
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuoteConfig {
    pub url: Option<String>,
}

/// Account whose balances are displayed and which sends and receives the swaps.
#[derive(Clone, Debug, Deserialize)]
pub struct DisplayConfig {
    pub address: Address,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TimeoutsConfig {
    pub quote_secs: u64,
    pub aggregator_secs: u64,
    pub gas_estimation_secs: u64,
    pub broadcast_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self { quote_secs: 15, aggregator_secs: 30, gas_estimation_secs: 30, broadcast_secs: 60 }
    }
}

impl TimeoutsConfig {
    pub fn quote(&self) -> Duration {
        Duration::from_secs(self.quote_secs)
    }

    pub fn aggregator(&self) -> Duration {
        Duration::from_secs(self.aggregator_secs)
    }

    pub fn gas_estimation(&self) -> Duration {
        Duration::from_secs(self.gas_estimation_secs)
    }

    pub fn broadcast(&self) -> Duration {
        Duration::from_secs(self.broadcast_secs)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChainConfig {
    pub chain_id: ChainId,
    pub url: String,
}

/// Names of the environment variables holding secrets.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    pub api_key_env: String,
    pub private_key_env: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self { api_key_env: "SWAPS_API_KEY".to_string(), private_key_env: "PRIVATE_KEY".to_string() }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TopologyConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
    pub display: DisplayConfig,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    pub chains: BTreeMap<String, ChainConfig>,
    #[serde(default)]
    pub tokens: Vec<TokenInfo>,
    #[serde(default)]
    pub secrets: SecretsConfig,
}

impl TopologyConfig {
    pub fn load_from_file(file_name: String) -> Result<TopologyConfig> {
        let contents = fs::read_to_string(file_name)?;
        let config: TopologyConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Configured chain ids, ordered by chain name.
    pub fn chain_ids(&self) -> Vec<ChainId> {
        self.chains.values().map(|c| c.chain_id).collect()
    }
}
