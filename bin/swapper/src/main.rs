use clap::Parser;
use eyre::Result;
use swap_topology::{Topology, TopologyConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::arguments::{AppArgs, Command};

mod arguments;
mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,alloy_rpc_client=off,hyper=off,hyper_util=off".into());
    let fmt_layer = fmt::Layer::default().with_thread_ids(true).with_file(false).with_line_number(true).with_filter(env_filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    let args = AppArgs::parse();

    let topology_config = TopologyConfig::load_from_file(args.config)?;
    let topology = Topology::from(topology_config)?;

    match args.command {
        Command::Serve => commands::serve(&topology).await,
        Command::Balances { chain_id } => commands::print_balances(&topology.balances(), chain_id).await,
        Command::SwapPreset => commands::swap_preset(&topology).await,
        Command::Swap(swap_args) => commands::swap(&topology, swap_args).await,
    }
}
