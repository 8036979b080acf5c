pub use secrets::Secrets;
pub use topology::Topology;
pub use topology_config::{
    AggregatorConfig, ChainConfig, DisplayConfig, QuoteConfig, SecretsConfig, ServerConfig, TimeoutsConfig, TopologyConfig,
};

mod secrets;
mod topology;
mod topology_config;
