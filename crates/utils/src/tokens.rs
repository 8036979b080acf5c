use alloy_primitives::{address, Address};
use defi_types::ChainId;

use crate::chains::*;

/// Placeholder the aggregator uses for the chain's native asset.
pub const ETH_NATIVE_ADDRESS: Address = Address::ZERO;

pub const USDC_BASE_SEPOLIA: Address = address!("036CbD53842c5426634e7929541eC2318f3dCF7e");
pub const WETH_ARBITRUM_SEPOLIA_BRIDGED: Address = address!("2b2C81e08f1Af8835a78Bb2A90AE924ACE0eA4bE");

/// Wrapped native token per chain.
pub fn weth_address(chain_id: ChainId) -> Option<Address> {
    let address = match chain_id {
        ETHEREUM => address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
        ARBITRUM_ONE => address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1"),
        OPTIMISM | BASE | BASE_SEPOLIA => address!("4200000000000000000000000000000000000006"),
        POLYGON => address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619"),
        BSC => address!("4DB5a66E937A9f4473FA95B1cAF1d1e1d62E29EA"),
        ETHEREUM_SEPOLIA => address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
        _ => return None,
    };
    Some(address)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeOrWrapped {
    Eth,
    Weth,
}

impl NativeOrWrapped {
    /// The other side of an ETH/WETH pair.
    pub fn counterpart(&self) -> Self {
        match self {
            NativeOrWrapped::Eth => NativeOrWrapped::Weth,
            NativeOrWrapped::Weth => NativeOrWrapped::Eth,
        }
    }

    pub fn address_on(&self, chain_id: ChainId) -> Option<Address> {
        match self {
            NativeOrWrapped::Eth => Some(ETH_NATIVE_ADDRESS),
            NativeOrWrapped::Weth => weth_address(chain_id),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            NativeOrWrapped::Eth => "ETH",
            NativeOrWrapped::Weth => "WETH",
        }
    }
}

impl std::str::FromStr for NativeOrWrapped {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ETH" => Ok(NativeOrWrapped::Eth),
            "WETH" => Ok(NativeOrWrapped::Weth),
            _ => Err(format!("unknown token {s}, expected ETH or WETH")),
        }
    }
}
