use defi_types::ChainId;

pub const ETHEREUM: ChainId = 1;
pub const OPTIMISM: ChainId = 10;
pub const BSC: ChainId = 56;
pub const POLYGON: ChainId = 137;
pub const BASE: ChainId = 8453;
pub const ARBITRUM_ONE: ChainId = 42161;
pub const BASE_SEPOLIA: ChainId = 84532;
pub const ARBITRUM_SEPOLIA: ChainId = 421614;
pub const ETHEREUM_SEPOLIA: ChainId = 11155111;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub id: ChainId,
    pub name: &'static str,
    pub native_symbol: &'static str,
}

pub const SUPPORTED_CHAINS: &[ChainDescriptor] = &[
    ChainDescriptor { id: ETHEREUM, name: "Ethereum", native_symbol: "ETH" },
    ChainDescriptor { id: ARBITRUM_ONE, name: "Arbitrum One", native_symbol: "ETH" },
    ChainDescriptor { id: OPTIMISM, name: "Optimism", native_symbol: "ETH" },
    ChainDescriptor { id: POLYGON, name: "Polygon", native_symbol: "MATIC" },
    ChainDescriptor { id: BASE, name: "Base", native_symbol: "ETH" },
    ChainDescriptor { id: BSC, name: "BSC", native_symbol: "BNB" },
    ChainDescriptor { id: ETHEREUM_SEPOLIA, name: "Ethereum Sepolia", native_symbol: "ETH" },
    ChainDescriptor { id: BASE_SEPOLIA, name: "Base Sepolia", native_symbol: "ETH" },
    ChainDescriptor { id: ARBITRUM_SEPOLIA, name: "Arbitrum Sepolia", native_symbol: "ETH" },
];

fn descriptor(chain_id: ChainId) -> Option<&'static ChainDescriptor> {
    SUPPORTED_CHAINS.iter().find(|c| c.id == chain_id)
}

/// Display name, `Chain ID <id>` for chains outside the catalogue.
pub fn chain_name(chain_id: ChainId) -> String {
    match descriptor(chain_id) {
        Some(c) => c.name.to_string(),
        None => format!("Chain ID {chain_id}"),
    }
}

pub fn native_symbol(chain_id: ChainId) -> &'static str {
    descriptor(chain_id).map(|c| c.native_symbol).unwrap_or("ETH")
}

fn explorer_base(chain_id: ChainId) -> &'static str {
    match chain_id {
        BASE_SEPOLIA => "https://sepolia.basescan.org",
        ARBITRUM_SEPOLIA => "https://sepolia.arbiscan.io",
        POLYGON => "https://polygonscan.com",
        OPTIMISM => "https://optimistic.etherscan.io",
        ARBITRUM_ONE => "https://arbiscan.io",
        _ => "https://etherscan.io",
    }
}

pub fn explorer_address_url(chain_id: ChainId, address: &str) -> String {
    format!("{}/address/{address}", explorer_base(chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_name() {
        assert_eq!(chain_name(BASE_SEPOLIA), "Base Sepolia");
        assert_eq!(chain_name(999), "Chain ID 999");
    }

    #[test]
    fn test_native_symbol() {
        assert_eq!(native_symbol(POLYGON), "MATIC");
        assert_eq!(native_symbol(BSC), "BNB");
        assert_eq!(native_symbol(999), "ETH");
    }

    #[test]
    fn test_explorer_url() {
        assert_eq!(explorer_address_url(ARBITRUM_SEPOLIA, "0xabc"), "https://sepolia.arbiscan.io/address/0xabc");
        assert_eq!(explorer_address_url(BASE, "0xabc"), "https://etherscan.io/address/0xabc");
    }
}
