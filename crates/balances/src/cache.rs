use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use defi_types::{BalanceCacheKey, SwapError};
use eyre::Result;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone, Debug)]
enum CacheEntry<V> {
    Ready(V),
    Stale(Option<V>),
}

impl<V: Clone> CacheEntry<V> {
    fn last_known(&self) -> Option<V> {
        match self {
            CacheEntry::Ready(v) | CacheEntry::Stale(Some(v)) => Some(v.clone()),
            CacheEntry::Stale(None) => None,
        }
    }
}

/// Cache slot. `generation` is bumped by every invalidation so a fetch that started
/// before it cannot store its result as fresh.
#[derive(Clone, Debug)]
struct CacheSlot<V> {
    entry: CacheEntry<V>,
    generation: u64,
}

impl<V> Default for CacheSlot<V> {
    fn default() -> Self {
        Self { entry: CacheEntry::Stale(None), generation: 0 }
    }
}

/// Keyed async cache of chain reads.
///
/// Entries are never removed. Invalidation marks them stale and the next read refetches,
/// keeping the last known value around for [`BalanceCache::last_known`].
#[derive(Clone, Debug)]
pub struct BalanceCache<K, V> {
    data: Arc<RwLock<HashMap<K, CacheSlot<V>>>>,
}

impl<K, V> Default for BalanceCache<K, V> {
    fn default() -> Self {
        Self { data: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl<K, V> BalanceCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: K, fx: F) -> Result<V>
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let generation = match self.data.read().await.get(&key) {
            Some(CacheSlot { entry: CacheEntry::Ready(value), .. }) => return Ok(value.clone()),
            Some(slot) => slot.generation,
            None => 0,
        };

        let fetched = fx(key.clone()).await;

        let mut data = self.data.write().await;
        let slot = data.entry(key).or_default();
        match fetched {
            Ok(value) => {
                if slot.generation == generation {
                    slot.entry = CacheEntry::Ready(value.clone());
                } else {
                    debug!("Invalidated during fetch, entry stays stale");
                }
                Ok(value)
            }
            Err(e) => {
                slot.entry = CacheEntry::Stale(slot.entry.last_known());
                Err(e)
            }
        }
    }

    /// Marks `key` stale. Unknown keys are recorded as stale so the first read fetches.
    pub async fn invalidate(&self, key: &K) {
        let mut data = self.data.write().await;
        let slot = data.entry(key.clone()).or_default();
        slot.generation = slot.generation.wrapping_add(1);
        slot.entry = CacheEntry::Stale(slot.entry.last_known());
    }

    pub async fn is_stale(&self, key: &K) -> bool {
        !matches!(self.data.read().await.get(key), Some(CacheSlot { entry: CacheEntry::Ready(_), .. }))
    }

    pub async fn last_known(&self, key: &K) -> Option<V> {
        self.data.read().await.get(key).and_then(|slot| slot.entry.last_known())
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }
}

/// Invalidation target used by [`crate::Balances::refetch_balances`].
#[async_trait]
pub trait BalanceCacheStore: Send + Sync {
    async fn invalidate(&self, key: &BalanceCacheKey) -> Result<(), SwapError>;
}

#[async_trait]
impl<V> BalanceCacheStore for BalanceCache<BalanceCacheKey, V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn invalidate(&self, key: &BalanceCacheKey) -> Result<(), SwapError> {
        BalanceCache::invalidate(self, key).await;
        Ok(())
    }
}
