use clap::{Parser, Subcommand};
use defi_types::ChainId;
use defi_utils::chains::{ARBITRUM_SEPOLIA, BASE_SEPOLIA};
use defi_utils::tokens::NativeOrWrapped;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the quote proxy
    Serve,
    /// Print balances of the display address
    Balances {
        #[arg(long)]
        chain_id: Option<ChainId>,
    },
    /// Swap 1 USDC on Base Sepolia to WETH on Arbitrum Sepolia
    SwapPreset,
    /// Swap ETH or WETH between two chains
    Swap(SwapArgs),
}

#[derive(Parser, Debug)]
pub struct SwapArgs {
    #[arg(long, default_value_t = BASE_SEPOLIA)]
    pub src_chain: ChainId,

    #[arg(long, default_value_t = ARBITRUM_SEPOLIA)]
    pub dst_chain: ChainId,

    /// Source token. The destination is its counterpart (ETH <-> WETH).
    #[arg(long, default_value = "ETH")]
    pub token: NativeOrWrapped,

    /// Decimal amount of the source token, 18 decimals.
    #[arg(long)]
    pub amount: String,
}

#[derive(Parser, Debug)]
#[command(name = "swapper", version, about, long_about = None)]
pub struct AppArgs {
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}
