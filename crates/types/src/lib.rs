pub use action::{ActionType, SwapActionRequest, SwapDirection, DEFAULT_SLIPPAGE_BPS};
pub use cache_key::{BalanceCacheKey, ContractFunction};
pub use chain::{ChainId, TokenInfo};
pub use error::SwapError;
pub use route::{AggregatorError, AggregatorResponse, RouteResult, SwapResult};
pub use transaction::UnsignedTransaction;

mod action;
mod cache_key;
mod chain;
mod error;
mod route;
mod serde_helpers;
mod transaction;
