pub use balances::{BalanceSheet, Balances, TokenLine};
pub use cache::{BalanceCache, BalanceCacheStore};
pub use reader::{AlloyBalanceReader, BalanceReader};

mod balances;
mod cache;
mod reader;
