//! In-memory [`CacheClient`].
//!
//! A small query cache for tests and non-UI consumers. Entries are indexed by
//! [`QueryKey::hash_key`]; writes are last-write-wins per key. Query functions
//! registered per operation are what `refetch_queries` runs.
//!
//! The entry map sits behind a `RwLock` that is always released before any
//! query function is awaited. Every refetch takes a per-entry fetch id. A
//! cancel moves the entry's cancel epoch past every id handed out so far, and
//! a fetch whose id is below the epoch drops its result on completion.
//! Overlapping refetches of one key are tracked independently.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use super::client::{BoxFuture, CacheClient, QueryFilter, Updater};
use super::key::QueryKey;

/// Async function producing fresh data for a key.
pub type QueryFn = Arc<dyn Fn(QueryKey) -> BoxFuture<'static, Result<Value, String>> + Send + Sync>;

/// Errors from [`MemoryCache`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryCacheError {
    /// A registered query function returned an error.
    #[error("Query {key} failed: {message}")]
    QueryFailed {
        /// The key's [`hash_key`](QueryKey::hash_key).
        key: String,
        /// The query function's message.
        message: String,
    },
}

/// Fetch state of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No fetch in progress.
    #[default]
    Idle,
    /// At least one live refetch is awaiting its query function.
    Fetching,
    /// Every in-flight refetch was cancelled; their results will be dropped.
    Cancelled,
}

#[derive(Debug)]
struct Entry {
    key: QueryKey,
    data: Option<Value>,
    stale: bool,
    /// Id the next refetch of this entry receives.
    next_fetch: u64,
    /// Fetches with an id below this were cancelled.
    cancel_epoch: u64,
    in_flight: usize,
}

impl Entry {
    fn new(key: QueryKey) -> Self {
        Self {
            key,
            data: None,
            stale: false,
            next_fetch: 0,
            cancel_epoch: 0,
            in_flight: 0,
        }
    }

    fn status(&self) -> FetchStatus {
        if self.in_flight == 0 {
            FetchStatus::Idle
        } else if self.cancel_epoch >= self.next_fetch {
            FetchStatus::Cancelled
        } else {
            FetchStatus::Fetching
        }
    }

    fn start_fetch(&mut self) -> u64 {
        let id = self.next_fetch;
        self.next_fetch += 1;
        self.in_flight += 1;
        id
    }

    fn cancel(&mut self) {
        if self.in_flight > 0 {
            self.cancel_epoch = self.next_fetch;
        }
    }
}

/// In-memory query cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<BTreeMap<String, Entry>>,
    query_fns: RwLock<HashMap<String, QueryFn>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the function `refetch_queries` runs for `operation`.
    pub fn register_query_fn<F, Fut>(&self, operation: impl Into<String>, f: F)
    where
        F: Fn(QueryKey) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + Send + 'static,
    {
        let query_fn: QueryFn =
            Arc::new(move |key: QueryKey| -> BoxFuture<'static, Result<Value, String>> {
                Box::pin(f(key))
            });
        self.query_fns
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(operation.into(), query_fn);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the entry at `key` has been invalidated since its last write.
    pub fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key.hash_key())
            .map(|e| e.stale)
    }

    /// Fetch state of the entry at `key`.
    pub fn fetch_status(&self, key: &QueryKey) -> Option<FetchStatus> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key.hash_key())
            .map(Entry::status)
    }

    /// Keys of every entry `filter` selects.
    pub fn matching_keys(&self, filter: &QueryFilter) -> Vec<QueryKey> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|e| filter.matches(&e.key))
            .map(|e| e.key.clone())
            .collect()
    }

    fn query_fn(&self, operation: &str) -> Option<QueryFn> {
        self.query_fns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(operation)
            .cloned()
    }

    /// Starts a fetch on every matching entry, returning keys with fetch ids.
    fn begin_fetch(&self, filter: &QueryFilter) -> Vec<(QueryKey, u64)> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .values_mut()
            .filter(|e| filter.matches(&e.key))
            .map(|e| (e.key.clone(), e.start_fetch()))
            .collect()
    }

    /// Stores a fetch result unless that fetch was cancelled meanwhile.
    fn finish_fetch(&self, key: &QueryKey, fetch_id: u64, result: Option<Value>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = entries.get_mut(&key.hash_key()) else {
            return;
        };

        entry.in_flight = entry.in_flight.saturating_sub(1);
        if fetch_id < entry.cancel_epoch {
            trace!(key = %key.hash_key(), fetch_id, "dropping result of cancelled fetch");
        } else if let Some(value) = result {
            entry.data = Some(value);
            entry.stale = false;
        }
    }
}

impl CacheClient for MemoryCache {
    type Error = MemoryCacheError;

    fn invalidate_queries(&self, filter: QueryFilter) -> BoxFuture<'_, Result<(), Self::Error>> {
        Box::pin(async move {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            let mut count = 0usize;
            for entry in entries.values_mut().filter(|e| filter.matches(&e.key)) {
                entry.stale = true;
                count += 1;
            }
            debug!(query_key = %filter.query_key.hash_key(), count, "invalidated entries");
            Ok(())
        })
    }

    fn refetch_queries(&self, filter: QueryFilter) -> BoxFuture<'_, Result<(), Self::Error>> {
        Box::pin(async move {
            let fetches = self.begin_fetch(&filter);
            debug!(query_key = %filter.query_key.hash_key(), count = fetches.len(), "refetching entries");

            let mut first_error = None;
            for (key, fetch_id) in fetches {
                let Some(query_fn) = self.query_fn(key.operation()) else {
                    self.finish_fetch(&key, fetch_id, None);
                    continue;
                };

                match query_fn(key.clone()).await {
                    Ok(value) => self.finish_fetch(&key, fetch_id, Some(value)),
                    Err(message) => {
                        self.finish_fetch(&key, fetch_id, None);
                        first_error.get_or_insert(MemoryCacheError::QueryFailed {
                            key: key.hash_key(),
                            message,
                        });
                    }
                }
            }

            match first_error {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
    }

    fn cancel_queries(&self, filter: QueryFilter) -> BoxFuture<'_, Result<(), Self::Error>> {
        Box::pin(async move {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            for entry in entries.values_mut().filter(|e| filter.matches(&e.key)) {
                entry.cancel();
            }
            Ok(())
        })
    }

    fn get_query_data(&self, key: &QueryKey) -> Option<Value> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key.hash_key())
            .and_then(|e| e.data.clone())
    }

    fn set_query_data(&self, key: &QueryKey, updater: Updater) -> Option<Value> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries
            .entry(key.hash_key())
            .or_insert_with(|| Entry::new(key.clone()));

        let value = updater.apply(entry.data.take());
        entry.data = Some(value.clone());
        entry.stale = false;
        Some(value)
    }
}
