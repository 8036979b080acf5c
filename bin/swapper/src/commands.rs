use alloy_primitives::U256;
use balance_cache::Balances;
use defi_types::{ChainId, SwapActionRequest, SwapError, DEFAULT_SLIPPAGE_BPS};
use defi_utils::chains::{ARBITRUM_SEPOLIA, BASE_SEPOLIA};
use defi_utils::parse_units;
use defi_utils::tokens::{NativeOrWrapped, USDC_BASE_SEPOLIA, WETH_ARBITRUM_SEPOLIA_BRIDGED};
use eyre::{eyre, Result};
use swap_rpc_handler::start_web_server_worker;
use swap_topology::Topology;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::arguments::SwapArgs;

/// 1 USDC, 6 decimals.
const PRESET_AMOUNT: u64 = 1_000_000;
const ETH_DECIMALS: u8 = 18;

pub async fn serve(topology: &Topology) -> Result<()> {
    let shutdown_token = CancellationToken::new();
    let mut worker = tokio::spawn(start_web_server_worker(topology.server_host(), topology.app_state()?, shutdown_token.clone()));

    let msg = tokio::select! {
        res = &mut worker => res??,
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received");
            shutdown_token.cancel();
            worker.await??
        }
    };
    info!("{msg}");
    Ok(())
}

pub async fn print_balances(balances: &Balances, chain_id: Option<ChainId>) -> Result<()> {
    let chains = match chain_id {
        Some(chain_id) => vec![chain_id],
        None => balances.chains().to_vec(),
    };
    for chain_id in chains {
        match balances.balance_sheet(chain_id).await {
            Ok(sheet) => println!("{sheet}"),
            Err(e) => error!("Balances unavailable chain={chain_id} : {e}"),
        }
    }
    Ok(())
}

pub fn preset_request(topology: &Topology) -> SwapActionRequest {
    let account = topology.display_address();
    SwapActionRequest::exact_in(
        account,
        USDC_BASE_SEPOLIA,
        BASE_SEPOLIA,
        WETH_ARBITRUM_SEPOLIA_BRIDGED,
        ARBITRUM_SEPOLIA,
        U256::from(PRESET_AMOUNT),
    )
    .with_recipient(account)
    .with_slippage_bps(DEFAULT_SLIPPAGE_BPS)
}

pub async fn swap_preset(topology: &Topology) -> Result<()> {
    execute(topology, preset_request(topology)).await
}

/// Builds the dynamic swap request and checks it against the current source balance.
pub async fn dynamic_request(topology: &Topology, balances: &Balances, args: &SwapArgs) -> Result<SwapActionRequest, SwapError> {
    let src_token = args
        .token
        .address_on(args.src_chain)
        .ok_or_else(|| SwapError::Validation(format!("no {} address known for chain {}", args.token.symbol(), args.src_chain)))?;
    let dst = args.token.counterpart();
    let dst_token = dst
        .address_on(args.dst_chain)
        .ok_or_else(|| SwapError::Validation(format!("no {} address known for chain {}", dst.symbol(), args.dst_chain)))?;

    let amount = parse_units(&args.amount, ETH_DECIMALS).map_err(|e| SwapError::Validation(format!("invalid amount {} : {e}", args.amount)))?;

    let account = topology.display_address();
    let request = SwapActionRequest::exact_in(account, src_token, args.src_chain, dst_token, args.dst_chain, amount)
        .with_recipient(account)
        .with_slippage_bps(DEFAULT_SLIPPAGE_BPS);
    request.validate()?;

    let balance = match args.token {
        NativeOrWrapped::Eth => balances.native_balance(args.src_chain).await,
        NativeOrWrapped::Weth => balances.token_balance(src_token, args.src_chain).await.map(|(balance, _)| balance),
    }
    .map_err(|e| SwapError::Upstream(format!("source balance unavailable : {e}")))?;

    if amount > balance {
        return Err(SwapError::Validation(format!("insufficient balance {balance} < {amount}")));
    }
    Ok(request)
}

pub async fn swap(topology: &Topology, args: SwapArgs) -> Result<()> {
    let request = dynamic_request(topology, &topology.balances(), &args).await?;
    execute(topology, request).await
}

async fn execute(topology: &Topology, request: SwapActionRequest) -> Result<()> {
    let orchestrator = topology.orchestrator()?;
    let balances = topology.balances();

    let result = orchestrator.broadcast(&request, None).await.map_err(|e| {
        error!("Swap failed : {e}");
        eyre!(e)
    })?;

    info!("Transaction hash {}", result.tx_hash);
    println!("{}", serde_json::to_string_pretty(&result)?);

    balances.refetch_balances(None).await;
    print_balances(&balances, None).await
}
