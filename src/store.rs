//! The route store (§2.3): owns both family tries, the cache, and the
//! locks that arbitrate concurrent access (§5).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use log::debug;

use crate::af::AddressFamily;
use crate::cache::{CachedRoute, LruCache};
use crate::errors::StoreError;
use crate::prefix::Prefix;
use crate::query::{best_route, MatchMode};
use crate::record::RouteEntry;
use crate::trie::Trie;

/// A snapshot for `GET /health`: `status` is derived by the caller from
/// whether the two counts agree.
pub struct HealthSnapshot {
    pub routes_loaded: usize,
    pub radix_tree_routes: usize,
}

pub struct RouteStore {
    v4: RwLock<Trie<u32>>,
    v6: RwLock<Trie<u128>>,
    cache: LruCache,
    max_metric: u16,
    /// The count the loader reported inserting, independent of what
    /// actually landed in the tries. Mirrors the tabular-mirror check the
    /// original service ran at `/health` (§9's "Pandas/Polars mirror"
    /// note) without keeping a second copy of the data around.
    loaded_count: AtomicUsize,
}

impl RouteStore {
    pub fn new(max_metric: u16, cache_capacity: usize) -> Self {
        RouteStore {
            v4: RwLock::new(Trie::new()),
            v6: RwLock::new(Trie::new()),
            cache: LruCache::new(cache_capacity),
            max_metric,
            loaded_count: AtomicUsize::new(0),
        }
    }

    /// Records how many rows the loader attempted to insert. Called once
    /// after a bulk load completes.
    pub fn record_loaded(&self, n: usize) {
        self.loaded_count.store(n, Ordering::Relaxed);
    }

    /// Inserts a single route. Takes the write lock of whichever family
    /// `prefix` belongs to; does not touch the cache (callers only insert
    /// during the single-threaded startup load, before the cache is ever
    /// consulted).
    pub fn insert(&self, prefix: &Prefix, next_hop: &str, metric: u16) {
        match *prefix {
            Prefix::V4 { bits, len } => {
                let entry = RouteEntry::new(prefix, next_hop, metric);
                insert_one(&self.v4, bits, len, entry);
            }
            Prefix::V6 { bits, len } => {
                let entry = RouteEntry::new(prefix, next_hop, metric);
                insert_one(&self.v6, bits, len, entry);
            }
        }
    }

    /// Total `RouteEntry` count across both families (I3).
    pub fn route_count(&self) -> usize {
        let v4 = self.v4.read().expect("v4 trie lock poisoned").route_count();
        let v6 = self.v6.read().expect("v6 trie lock poisoned").route_count();
        v4 + v6
    }

    pub fn health(&self) -> HealthSnapshot {
        HealthSnapshot {
            routes_loaded: self.loaded_count.load(Ordering::Relaxed),
            radix_tree_routes: self.route_count(),
        }
    }

    /// The end-to-end lookup of §4.5: parse, consult the cache, fall
    /// through to the trie on a miss, apply the §4.1 ordering, and
    /// populate the cache before returning.
    ///
    /// The family read lock stays held from the trie walk through the
    /// cache `put` (see `lookup_one`): a writer cannot clear the cache
    /// between this reader's snapshot and its insert, so a lookup can
    /// never resurrect a metric an in-flight update is about to replace
    /// (I4, §5's ordering guarantee).
    pub fn lookup(&self, query: &str) -> Result<CachedRoute, StoreError> {
        let prefix: Prefix = query.parse()?;
        let key = prefix.network_addr_string();

        if let Some(hit) = self.cache.get(&key) {
            debug!("lookup {key}: cache hit -> {}", hit.prefix_str);
            return Ok(hit);
        }

        let best = match prefix {
            Prefix::V4 { bits, .. } => lookup_one(&self.v4, &self.cache, &key, bits),
            Prefix::V6 { bits, .. } => lookup_one(&self.v6, &self.cache, &key, bits),
        };

        match best {
            Some(route) => {
                debug!("lookup {key}: cache miss -> {}", route.prefix_str);
                Ok(route)
            }
            None => {
                debug!("lookup {key}: no match");
                Err(StoreError::NotFound)
            }
        }
    }

    /// The update engine of §4.3. Validates the metric range, navigates
    /// the appropriate trie, mutates matching entries, and clears the
    /// cache before the write lock is released whenever at least one
    /// entry changed (§5's ordering guarantee).
    pub fn update_metric(
        &self,
        prefix: &Prefix,
        next_hop: &str,
        metric: i64,
        mode: MatchMode,
    ) -> Result<usize, StoreError> {
        if metric < 1 || metric > self.max_metric as i64 {
            return Err(StoreError::InvalidMetric(metric));
        }
        let metric = metric as u16;
        let prefix_str = prefix.to_string();

        let count = match *prefix {
            Prefix::V4 { bits, len } => {
                update_one(&self.v4, &self.cache, bits, len, &prefix_str, next_hop, metric, mode)
            }
            Prefix::V6 { bits, len } => {
                update_one(&self.v6, &self.cache, bits, len, &prefix_str, next_hop, metric, mode)
            }
        };

        debug!("update {prefix_str} nh={next_hop} metric={metric} mode={mode} -> {count} routes");
        Ok(count)
    }
}

fn insert_one<AF: AddressFamily>(
    trie_lock: &RwLock<Trie<AF>>,
    bits: AF,
    len: u8,
    entry: RouteEntry<AF>,
) {
    trie_lock
        .write()
        .expect("trie lock poisoned")
        .insert(bits, len, entry);
}

/// Walks the trie and populates the cache without releasing the family
/// read lock in between, so a concurrent update's `cache.clear()` (run
/// under the write lock) can never land between this snapshot and the
/// `put` that follows it.
fn lookup_one<AF: AddressFamily>(
    trie_lock: &RwLock<Trie<AF>>,
    cache: &LruCache,
    key: &str,
    bits: AF,
) -> Option<CachedRoute> {
    let trie = trie_lock.read().expect("trie lock poisoned");
    let matches = trie.lookup(bits);
    let best = best_route(&matches).map(to_cached);
    if let Some(route) = &best {
        cache.put(key.to_string(), route.clone());
    }
    best
}

fn update_one<AF: AddressFamily>(
    trie_lock: &RwLock<Trie<AF>>,
    cache: &LruCache,
    bits: AF,
    len: u8,
    prefix_str: &str,
    next_hop: &str,
    metric: u16,
    mode: MatchMode,
) -> usize {
    let mut trie = trie_lock.write().expect("trie lock poisoned");
    let count = trie.update_metric(bits, len, prefix_str, next_hop, metric, mode);
    if count > 0 {
        // Cleared while the write lock is still held: no reader can
        // acquire the lock between the mutation and the clear.
        cache.clear();
    }
    count
}

fn to_cached<AF>(entry: &RouteEntry<AF>) -> CachedRoute {
    CachedRoute {
        prefix_str: entry.prefix_str.clone(),
        next_hop_str: entry.next_hop_str.clone(),
        metric: entry.metric,
    }
}
