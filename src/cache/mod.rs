//! Cache-aside layer. The store holds whole serialized results keyed by
//! page kind + subject; a refresh replaces an entry wholesale, so readers
//! never see a half-written value.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Storage contract for cached results. Implementations must be usable from
/// multiple concurrent callers.
pub trait CacheStore: Send + Sync {
    /// Returns the value for `key` if present and unexpired. Expired entries
    /// count as absent.
    fn get(&self, key: &str) -> Option<Value>;
    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: Value, ttl: Duration);
}

struct Entry {
    value: Value,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// In-process store. No size-based eviction: entries disappear only when
/// their TTL lapses or the process restarts.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get(key) {
            if entry.is_fresh(Instant::now()) {
                return Some(entry.value.clone());
            }
            entries.remove(key);
        }
        None
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        let entry = Entry {
            value,
            stored_at: Instant::now(),
            ttl,
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
    }
}

/// Cache-aside coordinator: check the store first, compute on a miss, store
/// the result. Concurrent misses for the same key may compute redundantly;
/// extraction is idempotent, so last writer wins without harm.
#[derive(Clone)]
pub struct Coordinator {
    store: Arc<dyn CacheStore>,
}

impl Coordinator {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Serves a fresh cached value for `key` without running `compute`;
    /// otherwise runs it, stores the result under `ttl`, and returns it.
    /// A failed compute is never stored, so the next request retries.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.store.get(key) {
            debug!("Cache hit for {key}");
            return Ok(serde_json::from_value(value)?);
        }

        debug!("Cache miss for {key}");
        let result = compute().await?;
        self.store.set(key, serde_json::to_value(&result)?, ttl);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn coordinator() -> Coordinator {
        Coordinator::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn second_call_within_ttl_does_not_recompute() {
        let cache = coordinator();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        for _ in 0..2 {
            let value: u32 = cache
                .get_or_compute("match-history:abc", ttl, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_is_recomputed() {
        let cache = coordinator();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_millis(10);

        let compute = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, StatsError>(String::from("v"))
        };

        let _: String = cache.get_or_compute("k", ttl, compute).await.unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
        let _: String = cache.get_or_compute("k", ttl, compute).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = coordinator();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        let failed: Result<u32> = cache
            .get_or_compute("k", ttl, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(StatsError::BadInput("boom".into()))
            })
            .await;
        assert!(failed.is_err());

        let value: u32 = cache
            .get_or_compute("k", ttl, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(3)
            })
            .await
            .unwrap();

        assert_eq!(value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn refresh_replaces_the_whole_entry() {
        let store = Arc::new(MemoryStore::new());
        let cache = Coordinator::new(store.clone());
        let ttl = Duration::from_secs(60);

        store.set("k", serde_json::json!({"old": true}), Duration::ZERO);
        let value: serde_json::Value = cache
            .get_or_compute("k", ttl, || async { Ok(serde_json::json!({"new": true})) })
            .await
            .unwrap();

        assert_eq!(value, serde_json::json!({"new": true}));
        assert_eq!(store.get("k"), Some(serde_json::json!({"new": true})));
    }

    #[test]
    fn keys_are_independent_slots() {
        let store = MemoryStore::new();
        store.set("a", serde_json::json!(1), Duration::from_secs(60));
        store.set("b", serde_json::json!(2), Duration::from_secs(60));
        assert_eq!(store.get("a"), Some(serde_json::json!(1)));
        assert_eq!(store.get("b"), Some(serde_json::json!(2)));
        assert_eq!(store.get("c"), None);
    }
}
