//! Memoizing cache shared by the LEI and MIC resolvers
//!
//! One component, two eviction disciplines: the LEI cache is size-bounded and
//! stores negative outcomes, the MIC cache is unbounded and filled in one go.
//! Concurrent `get_or_compute` calls for the same missing key share a single
//! computation.

use std::borrow::Borrow;
use std::future::Future;
use std::hash::Hash;

use moka::future::Cache;

/// Eviction discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    /// Entries live until the cache is dropped
    Unbounded,
    /// Entry count never settles above this bound
    MaxEntries(u64),
}

#[derive(Clone)]
pub struct MemoCache<K, V> {
    inner: Cache<K, V>,
    eviction: Eviction,
}

impl<K, V> MemoCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(eviction: Eviction) -> Self {
        let builder = Cache::builder();
        let inner = match eviction {
            Eviction::Unbounded => builder.build(),
            Eviction::MaxEntries(max) => builder.max_capacity(max).build(),
        };
        Self { inner, eviction }
    }

    pub fn bounded(max_entries: u64) -> Self {
        Self::new(Eviction::MaxEntries(max_entries))
    }

    pub fn unbounded() -> Self {
        Self::new(Eviction::Unbounded)
    }

    pub fn eviction(&self) -> Eviction {
        self.eviction
    }

    /// Return the cached value, or run `compute` once and store whatever it yields.
    pub async fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: Future<Output = V>,
    {
        self.inner.get_with(key, compute).await
    }

    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).await
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(key)
    }

    pub async fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }

    /// Settled entry count (pending maintenance is flushed first)
    pub async fn len(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    /// Whether no entry is stored. Does not run pending maintenance.
    pub fn is_empty(&self) -> bool {
        self.inner.iter().next().is_none()
    }
}

impl<K, V> std::fmt::Debug for MemoCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("eviction", &self.eviction)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}
