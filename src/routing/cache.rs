//! Shared route resolution cache.

use std::sync::Arc;

use dashmap::DashMap;

use crate::observability::metrics;
use crate::routing::model::ResolvedRoute;

/// A thread-safe map of cache key -> resolved route.
///
/// Values are replaced wholesale, never mutated in place. There is no
/// eviction: entries live as long as the resolver that owns the cache.
#[derive(Debug, Clone, Default)]
pub struct RouteCache {
    inner: Arc<DashMap<String, ResolvedRoute>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<ResolvedRoute> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    /// Insert unless the key is already present. Returns true if inserted.
    pub fn insert_if_absent(&self, key: String, route: ResolvedRoute) -> bool {
        let mut inserted = false;
        self.inner.entry(key).or_insert_with(|| {
            inserted = true;
            route
        });
        if inserted {
            metrics::record_cache_size(self.inner.len());
        }
        inserted
    }

    /// Insert or overwrite, returning the value now stored under `key`.
    ///
    /// Concurrent writers for the same key race; the last one wins.
    pub fn upsert(&self, key: String, route: ResolvedRoute) -> ResolvedRoute {
        let stored = self
            .inner
            .entry(key)
            .and_modify(|existing| *existing = route.clone())
            .or_insert(route)
            .value()
            .clone();
        metrics::record_cache_size(self.inner.len());
        stored
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
