//! The cache-client contract the facade is built on.
//!
//! Implementations own all storage, fetching and coalescing. The facade only
//! builds keys and filters and forwards calls, so errors come back exactly as
//! the client produced them.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use super::key::QueryKey;

/// Boxed, sendable future returned by [`CacheClient`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Predicate over stored keys.
pub type KeyPredicate = Arc<dyn Fn(&QueryKey) -> bool + Send + Sync>;

/// Selects cache entries: those whose key starts with `query_key` and, when
/// set, satisfy `predicate`.
#[derive(Clone)]
pub struct QueryFilter {
    /// Key prefix every matching entry shares.
    pub query_key: QueryKey,
    /// Extra condition evaluated against each candidate key.
    pub predicate: Option<KeyPredicate>,
}

impl QueryFilter {
    /// Matches every entry under `query_key`.
    pub fn new(query_key: QueryKey) -> Self {
        Self {
            query_key,
            predicate: None,
        }
    }

    /// Narrows the filter with a predicate.
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&QueryKey) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// True when `key` is selected by this filter.
    pub fn matches(&self, key: &QueryKey) -> bool {
        key.starts_with(&self.query_key) && self.predicate.as_ref().is_none_or(|p| p(key))
    }
}

impl fmt::Debug for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryFilter")
            .field("query_key", &self.query_key)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// New value for a cache entry: either the value itself, or a function of
/// the previous value.
pub enum Updater {
    /// Replace with this value.
    Value(Value),
    /// Compute from the previous value (`None` when the entry is empty).
    Fn(Box<dyn FnOnce(Option<Value>) -> Value + Send>),
}

impl Updater {
    /// Wraps an update function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce(Option<Value>) -> Value + Send + 'static,
    {
        Self::Fn(Box::new(f))
    }

    /// Resolves the new value given the previous one.
    pub fn apply(self, previous: Option<Value>) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Fn(f) => f(previous),
        }
    }
}

impl From<Value> for Updater {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Operations a query cache must provide.
///
/// Mirrors the `invalidateQueries` / `refetchQueries` / `cancelQueries` /
/// `getQueryData` / `setQueryData` surface of client-side query caches.
/// Reads and writes are synchronous against in-memory state; the other three
/// may suspend.
pub trait CacheClient: Send + Sync {
    /// Failure type passed through the facade untouched.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Marks matching entries stale.
    fn invalidate_queries(&self, filter: QueryFilter) -> BoxFuture<'_, Result<(), Self::Error>>;

    /// Re-executes matching queries now.
    fn refetch_queries(&self, filter: QueryFilter) -> BoxFuture<'_, Result<(), Self::Error>>;

    /// Asks in-flight matching queries to abort.
    fn cancel_queries(&self, filter: QueryFilter) -> BoxFuture<'_, Result<(), Self::Error>>;

    /// Reads the entry at exactly `key`.
    fn get_query_data(&self, key: &QueryKey) -> Option<Value>;

    /// Writes the entry at exactly `key`, returning the stored value.
    fn set_query_data(&self, key: &QueryKey, updater: Updater) -> Option<Value>;
}
