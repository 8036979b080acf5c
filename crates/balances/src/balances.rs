use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use defi_types::{BalanceCacheKey, ChainId, ContractFunction, SwapError, TokenInfo};
use defi_utils::{chain_name, explorer_address_url, format_token_amount, native_symbol, shorten_address, DEFAULT_SHORTEN_CHARS};
use eyre::{eyre, Result};
use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::{BalanceCache, BalanceCacheStore, BalanceReader};

const NATIVE_DECIMALS: u8 = 18;
const DISPLAY_PRECISION: usize = 6;

/// Balances of the display address across the configured chains and tokens.
pub struct Balances {
    display_address: Address,
    chains: Vec<ChainId>,
    tokens: Vec<TokenInfo>,
    readers: HashMap<ChainId, Arc<dyn BalanceReader>>,
    cache: BalanceCache<BalanceCacheKey, U256>,
    store: Option<Arc<dyn BalanceCacheStore>>,
}

impl Balances {
    pub fn new(display_address: Address, tokens: Vec<TokenInfo>) -> Self {
        let cache = BalanceCache::new();
        Self { display_address, chains: Vec::new(), tokens, readers: HashMap::new(), store: None, cache }
    }

    pub fn with_chain(mut self, chain_id: ChainId, reader: Arc<dyn BalanceReader>) -> Self {
        if !self.chains.contains(&chain_id) {
            self.chains.push(chain_id);
        }
        self.readers.insert(chain_id, reader);
        self
    }

    /// Forwards invalidations to an external `store` as well. The read cache is always
    /// marked stale; a key counts as invalidated only once `store` acknowledged it.
    pub fn with_store(self, store: Arc<dyn BalanceCacheStore>) -> Self {
        Self { store: Some(store), ..self }
    }

    pub fn display_address(&self) -> Address {
        self.display_address
    }

    pub fn chains(&self) -> &[ChainId] {
        &self.chains
    }

    pub fn tokens(&self) -> &[TokenInfo] {
        &self.tokens
    }

    pub fn cache(&self) -> &BalanceCache<BalanceCacheKey, U256> {
        &self.cache
    }

    /// Cache keys tracked for one chain: native balance first, then `balanceOf` and
    /// `decimals` for every token in configuration order.
    pub fn keys_for_chain(&self, chain_id: ChainId) -> Vec<BalanceCacheKey> {
        let mut keys = Vec::with_capacity(1 + 2 * self.tokens.len());
        keys.push(BalanceCacheKey::native(self.display_address, chain_id));
        for token in self.tokens.iter() {
            keys.push(BalanceCacheKey::balance_of(token.address, self.display_address, chain_id));
            keys.push(BalanceCacheKey::decimals(token.address, chain_id));
        }
        keys
    }

    /// Invalidates the tracked keys of `chain_id`, or of every configured chain when `None`.
    ///
    /// Chains run concurrently, keys within a chain in order. A key that fails to invalidate
    /// is logged and skipped. Returns the keys that were invalidated.
    pub async fn refetch_balances(&self, chain_id: Option<ChainId>) -> Vec<BalanceCacheKey> {
        let targets = match chain_id {
            Some(chain_id) => vec![chain_id],
            None => self.chains.clone(),
        };

        let tasks = targets.into_iter().map(|chain_id| self.invalidate_chain(chain_id));
        let acknowledged: Vec<BalanceCacheKey> = join_all(tasks).await.into_iter().flatten().collect();
        info!("Balances invalidated keys={}", acknowledged.len());
        acknowledged
    }

    async fn invalidate_chain(&self, chain_id: ChainId) -> Vec<BalanceCacheKey> {
        let mut acknowledged = Vec::new();
        for key in self.keys_for_chain(chain_id) {
            let store: &dyn BalanceCacheStore = match self.store.as_deref() {
                Some(store) => {
                    self.cache.invalidate(&key).await;
                    store
                }
                None => &self.cache,
            };
            match store.invalidate(&key).await {
                Ok(()) => {
                    debug!("Invalidated {key}");
                    acknowledged.push(key);
                }
                Err(e) => {
                    let e = match e {
                        SwapError::CacheInvalidation(_) => e,
                        other => SwapError::CacheInvalidation(format!("{key}: {other}")),
                    };
                    error!("{e}");
                }
            }
        }
        acknowledged
    }

    /// Reads `key` through the cache.
    pub async fn read(&self, key: BalanceCacheKey) -> Result<U256> {
        let reader = self.readers.get(&key.chain_id()).cloned().ok_or_else(|| eyre!("NO_READER_FOR_CHAIN {}", key.chain_id()))?;
        self.cache
            .get_or_fetch(key, |key| async move {
                match key {
                    BalanceCacheKey::Native { account, .. } => reader.native_balance(account).await,
                    BalanceCacheKey::Contract { token, function: ContractFunction::BalanceOf, args, .. } => {
                        let owner = args.first().copied().ok_or_else(|| eyre!("BALANCE_OF_WITHOUT_OWNER"))?;
                        reader.token_balance(token, owner).await
                    }
                    BalanceCacheKey::Contract { token, function: ContractFunction::Decimals, .. } => {
                        reader.token_decimals(token).await.map(U256::from)
                    }
                }
            })
            .await
    }

    pub async fn native_balance(&self, chain_id: ChainId) -> Result<U256> {
        self.read(BalanceCacheKey::native(self.display_address, chain_id)).await
    }

    pub async fn token_balance(&self, token: Address, chain_id: ChainId) -> Result<(U256, u8)> {
        let balance = self.read(BalanceCacheKey::balance_of(token, self.display_address, chain_id)).await?;
        let decimals = self.read(BalanceCacheKey::decimals(token, chain_id)).await?;
        let decimals = u8::try_from(decimals).map_err(|_| eyre!("BAD_DECIMALS {decimals}"))?;
        Ok((balance, decimals))
    }

    pub async fn balance_sheet(&self, chain_id: ChainId) -> Result<BalanceSheet> {
        let native = self.native_balance(chain_id).await?;

        let mut tokens = Vec::with_capacity(self.tokens.len());
        for token in self.tokens.iter() {
            let amount = match self.token_balance(token.address, chain_id).await {
                Ok((balance, decimals)) => Some(format_token_amount(balance, decimals, DISPLAY_PRECISION)),
                Err(e) => {
                    warn!("Token balance unavailable chain={chain_id} token={} : {e}", token.symbol);
                    None
                }
            };
            tokens.push(TokenLine { symbol: token.symbol.clone(), amount });
        }

        let address = self.display_address.to_string();
        Ok(BalanceSheet {
            chain_id,
            chain_name: chain_name(chain_id),
            address_short: shorten_address(&address, DEFAULT_SHORTEN_CHARS),
            explorer_url: explorer_address_url(chain_id, &address),
            native_symbol: native_symbol(chain_id).to_string(),
            native: format_token_amount(native, NATIVE_DECIMALS, DISPLAY_PRECISION),
            tokens,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenLine {
    pub symbol: String,
    pub amount: Option<String>,
}

/// Formatted balances of the display address on one chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceSheet {
    pub chain_id: ChainId,
    pub chain_name: String,
    pub address_short: String,
    pub explorer_url: String,
    pub native_symbol: String,
    pub native: String,
    pub tokens: Vec<TokenLine>,
}

impl fmt::Display for BalanceSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.chain_name, self.chain_id)?;
        writeln!(f, "  account  {}  {}", self.address_short, self.explorer_url)?;
        writeln!(f, "  {:<8} {}", self.native_symbol, self.native)?;
        for token in self.tokens.iter() {
            writeln!(f, "  {:<8} {}", token.symbol, token.amount.as_deref().unwrap_or("unavailable"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const DISPLAY: Address = address!("108e41248841d0c0d2303222324fF21C3ca88d73");
    const USDC: Address = address!("036CbD53842c5426634e7929541eC2318f3dCF7e");
    const WETH: Address = address!("2b2C81e08f1Af8835a78Bb2A90AE924ACE0eA4bE");

    #[derive(Default)]
    struct MockReader {
        native_calls: AtomicUsize,
    }

    #[async_trait]
    impl BalanceReader for MockReader {
        async fn native_balance(&self, _account: Address) -> Result<U256> {
            self.native_calls.fetch_add(1, Ordering::SeqCst);
            Ok(U256::from(1_500_000_000_000_000_000u128))
        }

        async fn token_balance(&self, token: Address, _owner: Address) -> Result<U256> {
            if token == WETH {
                return Err(eyre!("execution reverted"));
            }
            Ok(U256::from(2_500_000u64))
        }

        async fn token_decimals(&self, _token: Address) -> Result<u8> {
            Ok(6)
        }
    }

    /// Records invalidations and fails for one chosen key.
    #[derive(Default)]
    struct RecordingStore {
        seen: Mutex<Vec<BalanceCacheKey>>,
        fail_on: Option<BalanceCacheKey>,
    }

    #[async_trait]
    impl BalanceCacheStore for RecordingStore {
        async fn invalidate(&self, key: &BalanceCacheKey) -> Result<(), SwapError> {
            self.seen.lock().unwrap().push(key.clone());
            if self.fail_on.as_ref() == Some(key) {
                return Err(SwapError::CacheInvalidation("store unavailable".to_string()));
            }
            Ok(())
        }
    }

    fn balances(tokens: Vec<TokenInfo>) -> Balances {
        Balances::new(DISPLAY, tokens)
            .with_chain(84532, Arc::new(MockReader::default()))
            .with_chain(421614, Arc::new(MockReader::default()))
            .with_chain(11155111, Arc::new(MockReader::default()))
    }

    #[tokio::test]
    async fn test_refetch_single_chain_one_token() {
        let balances = balances(vec![TokenInfo::new(USDC, "USDC")]);

        let keys = balances.refetch_balances(Some(84532)).await;

        assert_eq!(
            keys,
            vec![
                BalanceCacheKey::native(DISPLAY, 84532),
                BalanceCacheKey::balance_of(USDC, DISPLAY, 84532),
                BalanceCacheKey::decimals(USDC, 84532),
            ]
        );
        assert!(keys.iter().all(|k| k.chain_id() == 84532));
    }

    #[tokio::test]
    async fn test_refetch_all_chains_once() {
        let _ = env_logger::try_init_from_env(env_logger::Env::default().default_filter_or("info"));
        let tokens = vec![TokenInfo::new(USDC, "USDC"), TokenInfo::new(WETH, "WETH")];
        let balances = balances(tokens);

        let keys = balances.refetch_balances(None).await;

        assert_eq!(keys.len(), 3 * (1 + 2 * 2));
        for chain_id in [84532, 421614, 11155111] {
            let per_chain: Vec<_> = keys.iter().filter(|k| k.chain_id() == chain_id).cloned().collect();
            assert_eq!(per_chain, balances.keys_for_chain(chain_id));
        }
    }

    #[tokio::test]
    async fn test_refetch_continues_after_failure() {
        let failing = BalanceCacheKey::balance_of(USDC, DISPLAY, 84532);
        let store = Arc::new(RecordingStore { fail_on: Some(failing.clone()), ..RecordingStore::default() });
        let balances = balances(vec![TokenInfo::new(USDC, "USDC")]).with_store(store.clone());

        let keys = balances.refetch_balances(Some(84532)).await;

        assert_eq!(store.seen.lock().unwrap().len(), 3);
        assert!(balances.cache().is_stale(&failing).await);
        assert_eq!(keys, vec![BalanceCacheKey::native(DISPLAY, 84532), BalanceCacheKey::decimals(USDC, 84532)]);
    }

    #[tokio::test]
    async fn test_invalidation_forces_reread() -> Result<()> {
        let reader = Arc::new(MockReader::default());
        let balances = Balances::new(DISPLAY, vec![]).with_chain(84532, reader.clone());

        balances.native_balance(84532).await?;
        balances.native_balance(84532).await?;
        assert_eq!(reader.native_calls.load(Ordering::SeqCst), 1);

        balances.refetch_balances(Some(84532)).await;
        assert!(balances.cache().is_stale(&BalanceCacheKey::native(DISPLAY, 84532)).await);

        balances.native_balance(84532).await?;
        assert_eq!(reader.native_calls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_external_store_still_forces_reread() -> Result<()> {
        let reader = Arc::new(MockReader::default());
        let store = Arc::new(RecordingStore::default());
        let balances = Balances::new(DISPLAY, vec![]).with_chain(84532, reader.clone()).with_store(store.clone());

        balances.native_balance(84532).await?;
        let keys = balances.refetch_balances(Some(84532)).await;
        assert_eq!(keys, vec![BalanceCacheKey::native(DISPLAY, 84532)]);
        assert_eq!(store.seen.lock().unwrap().len(), 1);

        balances.native_balance(84532).await?;
        assert_eq!(reader.native_calls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_balance_sheet() -> Result<()> {
        let balances = balances(vec![TokenInfo::new(USDC, "USDC"), TokenInfo::new(WETH, "WETH")]);

        let sheet = balances.balance_sheet(84532).await?;

        assert_eq!(sheet.chain_name, "Base Sepolia");
        assert_eq!(sheet.address_short, shorten_address(&DISPLAY.to_string(), DEFAULT_SHORTEN_CHARS));
        assert!(sheet.address_short.starts_with("0x108..."));
        assert_eq!(sheet.native_symbol, "ETH");
        assert_eq!(sheet.tokens[0], TokenLine { symbol: "USDC".to_string(), amount: Some(format_token_amount(U256::from(2_500_000u64), 6, 6)) });
        assert_eq!(sheet.tokens[1].amount, None);
        assert!(sheet.to_string().contains("unavailable"));
        Ok(())
    }

    #[tokio::test]
    async fn test_read_unknown_chain_fails() {
        let balances = balances(vec![]);
        assert!(balances.native_balance(1).await.is_err());
    }
}
