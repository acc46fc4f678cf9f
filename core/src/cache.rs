//! Keyed in-memory request cache with explicit and tag-based invalidation.
//!
//! # Design
//! One entry per `CacheKey`; `set` overwrites in place. Entries may carry
//! `CacheTag`s naming the entities they were derived from, so a write can
//! drop every dependent entry with `invalidate_tag` instead of rebuilding
//! each key by hand. There is no TTL, eviction or size bound: the cache lives
//! as long as the session that constructed it.
//!
//! Operations never fail. A missing entry is a miss (`None`), not an error.
//! The map sits behind a `parking_lot::Mutex` that is never held across an
//! `.await`.

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::debug;

/// Deterministic identifier of a logical request: operation name plus its
/// arguments rendered by value as JSON strings, e.g. `movie("42")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for an operation without arguments.
    pub fn new(operation: &str) -> Self {
        Self(format!("{operation}()"))
    }

    /// Key for an operation called with `args`.
    ///
    /// Each argument is quoted and escaped, so an argument containing the
    /// separator never collides with a longer argument list.
    pub fn with_args<I, A>(operation: &str, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: fmt::Display,
    {
        let rendered: Vec<String> = args
            .into_iter()
            .map(|a| serde_json::Value::String(a.to_string()).to_string())
            .collect();
        Self(format!("{operation}({})", rendered.join(",")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label of a domain entity a cache entry depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheTag(String);

impl CacheTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    tags: Vec<CacheTag>,
    created_at: Instant,
}

/// Session-scoped request cache. Construct once and share it (`Arc`) with
/// every service that should observe the same entries.
#[derive(Debug)]
pub struct RequestCache<V = String> {
    entries: Mutex<HashMap<CacheKey, CacheEntry<V>>>,
}

impl<V> Default for RequestCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone> RequestCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let value = self.entries.lock().get(key).map(|entry| entry.value.clone());
        debug!(key = %key, hit = value.is_some(), "cache lookup");
        value
    }

    pub fn set(&self, key: CacheKey, value: V) {
        self.set_tagged(key, value, Vec::new());
    }

    /// Store `value` under `key`, recording the entities it depends on.
    /// Replaces any previous entry for `key`, tags included.
    pub fn set_tagged(&self, key: CacheKey, value: V, tags: Vec<CacheTag>) {
        debug!(key = %key, tags = tags.len(), "cache store");
        self.entries.lock().insert(
            key,
            CacheEntry {
                value,
                tags,
                created_at: Instant::now(),
            },
        );
    }

    /// Remove a single entry. Returns whether one was present.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let removed = self.entries.lock().remove(key).is_some();
        debug!(key = %key, removed, "cache invalidate");
        removed
    }

    /// Remove every entry tagged with `tag`. Returns how many were removed.
    pub fn invalidate_tag(&self, tag: &CacheTag) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.contains(tag));
        let removed = before - entries.len();
        debug!(tag = tag.as_str(), removed, "cache invalidate tag");
        removed
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn created_at(&self, key: &CacheKey) -> Option<Instant> {
        self.entries.lock().get(key).map(|entry| entry.created_at)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
