//! Cache capability and an in-memory backend.
//!
//! The aggregated page TSconfig and the icon registrations resolved while
//! computing it are memoized through this interface. The cache is a
//! memoization layer, not a source of truth: entries carry a TTL, tags
//! allow bulk retrieval and flushing, and a missing backend just means the
//! pipeline recomputes on every call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Keyed string cache with tag-based bulk access.
///
/// No atomicity is guaranteed across calls; concurrent writers under a
/// recompute race simply overwrite each other, which is acceptable because
/// the cached value is a pure function of persistent state at call time.
pub trait ConfigCache {
    /// The value stored under `key`, or `None` when absent or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` with the given tags and lifetime.
    fn set(&self, key: &str, value: &str, tags: &[&str], ttl: Duration);

    /// All unexpired `(key, value)` entries carrying `tag`.
    fn entries_tagged(&self, tag: &str) -> Vec<(String, String)>;

    /// Drops every entry carrying `tag`.
    fn flush_tagged(&self, tag: &str);
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    tags: Vec<String>,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Process-local [`ConfigCache`] backed by a mutex-guarded map.
///
/// Used as the test double for the host cache and as a backend for hosts
/// without one. Expiry is checked lazily on read.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unexpired entries, for diagnostics and tests.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().expect("cache mutex poisoned");
        entries.values().filter(|e| !e.is_expired(now)).count()
    }

    /// Whether the cache holds no unexpired entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        let entry = entries.get(key)?;
        if entry.is_expired(Instant::now()) {
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: &str, value: &str, tags: &[&str], ttl: Duration) {
        let entry = Entry {
            value: value.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            expires_at: Instant::now() + ttl,
        };
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(key.to_string(), entry);
    }

    fn entries_tagged(&self, tag: &str) -> Vec<(String, String)> {
        let now = Instant::now();
        let entries = self.entries.lock().expect("cache mutex poisoned");
        let mut tagged: Vec<(String, String)> = entries
            .iter()
            .filter(|(_, e)| !e.is_expired(now) && e.tags.iter().any(|t| t == tag))
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect();
        // HashMap iteration order is arbitrary; keep replay deterministic.
        tagged.sort_by(|a, b| a.0.cmp(&b.0));
        tagged
    }

    fn flush_tagged(&self, tag: &str) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.retain(|_, e| !e.tags.iter().any(|t| t == tag));
    }
}
