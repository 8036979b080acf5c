use std::fmt;

use alloy_primitives::Address;

use crate::ChainId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContractFunction {
    BalanceOf,
    Decimals,
}

impl ContractFunction {
    pub fn name(&self) -> &'static str {
        match self {
            ContractFunction::BalanceOf => "balanceOf",
            ContractFunction::Decimals => "decimals",
        }
    }
}

/// Identity of one cached chain read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BalanceCacheKey {
    Native { account: Address, chain_id: ChainId },
    Contract { token: Address, function: ContractFunction, args: Vec<Address>, chain_id: ChainId },
}

impl BalanceCacheKey {
    pub fn native(account: Address, chain_id: ChainId) -> Self {
        BalanceCacheKey::Native { account, chain_id }
    }

    pub fn balance_of(token: Address, owner: Address, chain_id: ChainId) -> Self {
        BalanceCacheKey::Contract { token, function: ContractFunction::BalanceOf, args: vec![owner], chain_id }
    }

    pub fn decimals(token: Address, chain_id: ChainId) -> Self {
        BalanceCacheKey::Contract { token, function: ContractFunction::Decimals, args: Vec::new(), chain_id }
    }

    pub fn chain_id(&self) -> ChainId {
        match self {
            BalanceCacheKey::Native { chain_id, .. } | BalanceCacheKey::Contract { chain_id, .. } => *chain_id,
        }
    }
}

impl fmt::Display for BalanceCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceCacheKey::Native { account, chain_id } => write!(f, "balance({account})@{chain_id}"),
            BalanceCacheKey::Contract { token, function, args, chain_id } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{token}.{}({})@{chain_id}", function.name(), args.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let owner = address!("108e41248841d0c0d2303222324fF21C3ca88d73");
        let token = address!("036CbD53842c5426634e7929541eC2318f3dCF7e");
        let keys: HashSet<BalanceCacheKey> = [
            BalanceCacheKey::native(owner, 84532),
            BalanceCacheKey::balance_of(token, owner, 84532),
            BalanceCacheKey::decimals(token, 84532),
            BalanceCacheKey::decimals(token, 421614),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 4);
        assert!(keys.iter().filter(|k| k.chain_id() == 84532).count() == 3);
    }

    #[test]
    fn test_display() {
        let token = address!("036CbD53842c5426634e7929541eC2318f3dCF7e");
        let key = BalanceCacheKey::decimals(token, 84532);
        assert_eq!(key.to_string(), format!("{token}.decimals()@84532"));
    }
}
