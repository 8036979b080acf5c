use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// EVM chain identifier.
pub type ChainId = u64;

/// ERC-20 contract tracked on every configured chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
}

impl TokenInfo {
    pub fn new(address: Address, symbol: impl Into<String>) -> Self {
        Self { address, symbol: symbol.into() }
    }
}
