//! The two-tier dispatch cache.
//!
//! Exact matches (no captured parameters) live in an unbounded concurrent
//! map; parameterized matches live in a bounded LRU tier behind a mutex, the
//! colder path. A non-positive capacity disables both tiers, so every
//! request walks the trie. Failed lookups are never cached.

pub mod lru;

use crate::cache::lru::LruMap;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use waypoint_core::{Endpoint, Payload};

/// A resolved dispatch target: the endpoint plus the parameters captured
/// while matching its path. Immutable and cheap to clone.
pub struct CacheEntry<T: Payload> {
    endpoint: Arc<Endpoint<T>>,
    params: Arc<HashMap<String, String>>,
}

impl<T: Payload> CacheEntry<T> {
    /// Pair an endpoint with its captured parameters.
    pub fn new(endpoint: Arc<Endpoint<T>>, params: Arc<HashMap<String, String>>) -> Self {
        Self { endpoint, params }
    }

    /// The endpoint this entry resolves to.
    pub fn endpoint(&self) -> &Arc<Endpoint<T>> {
        &self.endpoint
    }

    /// The captured wildcard parameters, shared with every invocation served
    /// from this entry.
    pub fn params(&self) -> &Arc<HashMap<String, String>> {
        &self.params
    }
}

impl<T: Payload> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            params: self.params.clone(),
        }
    }
}

impl<T: Payload> std::fmt::Debug for CacheEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("endpoint", &self.endpoint.path())
            .field("params", &self.params)
            .finish()
    }
}

/// The request-path lookup cache.
pub struct DispatchCache<T: Payload> {
    exact: DashMap<String, CacheEntry<T>>,
    matched: Option<Mutex<LruMap<String, CacheEntry<T>>>>,
}

impl<T: Payload> DispatchCache<T> {
    /// Create a cache whose matched tier holds up to `capacity` entries.
    /// A non-positive capacity disables caching entirely.
    pub fn new(capacity: i64) -> Self {
        let matched = (capacity > 0).then(|| Mutex::new(LruMap::new(capacity as usize)));
        Self {
            exact: DashMap::new(),
            matched,
        }
    }

    /// True unless caching is disabled by configuration.
    pub fn enabled(&self) -> bool {
        self.matched.is_some()
    }

    /// Look up a request path, refreshing its recency in the matched tier.
    pub fn get(&self, path: &str) -> Option<CacheEntry<T>> {
        let matched = self.matched.as_ref()?;
        if let Some(entry) = self.exact.get(path) {
            return Some(entry.value().clone());
        }
        lock_tier(matched).get(path).cloned()
    }

    /// Store a resolved target under its request path. Entries without
    /// captured parameters go to the exact tier, the rest to the LRU tier.
    pub fn insert(&self, path: &str, entry: CacheEntry<T>) {
        let Some(matched) = self.matched.as_ref() else {
            return;
        };
        if entry.params.is_empty() {
            self.exact.insert(path.to_string(), entry);
        } else {
            lock_tier(matched).insert(path.to_string(), entry);
        }
    }

    /// Empty both tiers. Readers may observe one tier cleared before the
    /// other, which only costs them a recomputation.
    pub fn clear(&self) {
        self.exact.clear();
        if let Some(matched) = &self.matched {
            lock_tier(matched).clear();
        }
    }

    /// A merged read-only view of both tiers, exact entries taking
    /// precedence on key collision.
    pub fn snapshot(&self) -> HashMap<String, CacheEntry<T>> {
        let mut view = HashMap::new();
        if let Some(matched) = &self.matched {
            let tier = lock_tier(matched);
            for (path, entry) in tier.iter() {
                view.insert(path.clone(), entry.clone());
            }
        }
        for item in self.exact.iter() {
            view.insert(item.key().clone(), item.value().clone());
        }
        view
    }
}

fn lock_tier<'a, T: Payload>(
    tier: &'a Mutex<LruMap<String, CacheEntry<T>>>,
) -> MutexGuard<'a, LruMap<String, CacheEntry<T>>> {
    tier.lock().unwrap_or_else(PoisonError::into_inner)
}
