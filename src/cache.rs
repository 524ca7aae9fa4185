//! The LRU lookup cache (§4.4).
//!
//! Keyed by the canonical text of a query address, capped at a fixed
//! capacity, evicted on both `get` hits and `put`s so that "recently
//! used" tracks actual traffic rather than just insertion order. Never
//! stores negative results — a miss always falls through to the trie.
//!
//! Guarded by its own [`std::sync::Mutex`], distinct from the trie's
//! reader-writer lock, per §5's "finer-grained mutex" allowance.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// The cached shape of a best-route result: enough to answer
/// `GET /destination/{prefix}` without touching the trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRoute {
    pub prefix_str: String,
    pub next_hop_str: String,
    pub metric: u16,
}

struct Inner {
    order: VecDeque<String>,
    map: HashMap<String, CachedRoute>,
}

pub struct LruCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl LruCache {
    pub fn new(capacity: usize) -> Self {
        LruCache {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner {
                order: VecDeque::new(),
                map: HashMap::new(),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<CachedRoute> {
        let mut inner = self.inner.lock().expect("lru cache lock poisoned");
        let found = inner.map.get(key).cloned();
        if found.is_some() {
            touch(&mut inner.order, key);
        }
        found
    }

    pub fn put(&self, key: String, value: CachedRoute) {
        let mut inner = self.inner.lock().expect("lru cache lock poisoned");
        if inner.map.contains_key(&key) {
            touch(&mut inner.order, &key);
        } else {
            if inner.map.len() >= self.capacity {
                if let Some(evicted) = inner.order.pop_front() {
                    inner.map.remove(&evicted);
                }
            }
            inner.order.push_back(key.clone());
        }
        inner.map.insert(key, value);
    }

    /// Drops every entry. Called by the update engine whenever a metric
    /// update matches at least one route (I4).
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("lru cache lock poisoned");
        inner.order.clear();
        inner.map.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("lru cache lock poisoned").map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn touch(order: &mut VecDeque<String>, key: &str) {
    if let Some(pos) = order.iter().position(|k| k == key) {
        order.remove(pos);
    }
    order.push_back(key.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(tag: &str) -> CachedRoute {
        CachedRoute {
            prefix_str: format!("10.0.0.0/{tag}"),
            next_hop_str: "10.0.0.1".to_string(),
            metric: 100,
        }
    }

    #[test]
    fn basic_get_put() {
        let cache = LruCache::new(3);
        cache.put("a".to_string(), route("8"));
        assert_eq!(cache.get("a").unwrap().prefix_str, "10.0.0.0/8");
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = LruCache::new(2);
        cache.put("a".to_string(), route("8"));
        cache.put("b".to_string(), route("16"));
        cache.put("c".to_string(), route("24"));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn get_hit_refreshes_recency() {
        let cache = LruCache::new(2);
        cache.put("a".to_string(), route("8"));
        cache.put("b".to_string(), route("16"));
        cache.get("a");
        cache.put("c".to_string(), route("24"));
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = LruCache::new(3);
        cache.put("a".to_string(), route("8"));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn put_overwrites_without_growing() {
        let cache = LruCache::new(3);
        cache.put("a".to_string(), route("8"));
        cache.put("a".to_string(), route("16"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").unwrap().prefix_str, "10.0.0.0/16");
    }
}
