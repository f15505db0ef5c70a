//! The cache utilities facade.
//!
//! [`create_utils_factory`] turns a [`UtilsConfig`] (query keys plus service
//! groups) into a [`UtilsFactory`]. Given a cache client, the factory builds a
//! [`Utils`] value shaped as `group -> operation -> {invalidate, refetch,
//! getData, setData, cancel}`:
//!
//! ```
//! use std::sync::Arc;
//! use gqlforge::cache::{MemoryCache, UtilsConfig, create_query_keys, create_utils_factory};
//! use gqlforge_define::ServiceGroups;
//! use serde_json::json;
//!
//! let ops = ["GetUser"];
//! let factory = create_utils_factory(UtilsConfig::new(create_query_keys(ops), ServiceGroups::infer(ops)));
//! let utils = factory.build(Arc::new(MemoryCache::new()));
//!
//! let vars = json!({"id": 1});
//! utils["users"]["getUser"].set_data(json!({"name": "A"}), Some(&vars));
//! assert_eq!(utils["users"]["getUser"].get_data(Some(&vars)), Some(json!({"name": "A"})));
//! ```

use std::collections::BTreeMap;
use std::ops::Index;
use std::sync::Arc;

use gqlforge_define::ServiceGroups;
use gqlforge_define::naming::to_camel_case;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::client::{CacheClient, QueryFilter, Updater};
use super::key::{QueryKey, QueryKeyFn, QueryKeys};

/// Variable filters for invalidate/refetch/cancel.
pub type Filters = Map<String, Value>;

/// Inputs to [`create_utils_factory`].
#[derive(Debug, Clone, Default)]
pub struct UtilsConfig {
    /// Key functions for every known operation.
    pub query_keys: QueryKeys,
    /// Service grouping of those operations.
    pub groups: ServiceGroups,
}

impl UtilsConfig {
    /// Bundles keys and groups.
    pub fn new(query_keys: QueryKeys, groups: ServiceGroups) -> Self {
        Self { query_keys, groups }
    }
}

/// Builds [`Utils`] values for any cache client.
#[derive(Debug, Clone)]
pub struct UtilsFactory {
    config: Arc<UtilsConfig>,
}

/// Creates a factory from keys and groups.
pub fn create_utils_factory(config: UtilsConfig) -> UtilsFactory {
    UtilsFactory {
        config: Arc::new(config),
    }
}

impl UtilsFactory {
    /// The configuration this factory was created from.
    pub fn config(&self) -> &UtilsConfig {
        &self.config
    }

    /// Builds the facade over `client`.
    ///
    /// Operations listed in a group but missing from the query keys are
    /// skipped with a warning.
    pub fn build<C: CacheClient>(&self, client: Arc<C>) -> Utils<C> {
        let mut groups = BTreeMap::new();

        for (group, operations) in self.config.groups.iter() {
            let mut entries = BTreeMap::new();
            for operation in operations {
                let Some(key) = self.config.query_keys.get(operation) else {
                    warn!(group, operation = %operation, "no query key for grouped operation; skipping");
                    continue;
                };
                entries.insert(
                    to_camel_case(operation),
                    OperationUtils {
                        key: key.clone(),
                        client: Arc::clone(&client),
                    },
                );
            }
            groups.insert(group.to_string(), GroupUtils { operations: entries });
        }

        debug!(groups = groups.len(), "built cache utils");
        Utils { groups }
    }
}

/// Facade over one cache client, grouped by service.
pub struct Utils<C> {
    groups: BTreeMap<String, GroupUtils<C>>,
}

impl<C> Utils<C> {
    /// Looks up a service group.
    pub fn group(&self, name: &str) -> Option<&GroupUtils<C>> {
        self.groups.get(name)
    }

    /// Looks up an operation by group and camel-cased name.
    pub fn operation(&self, group: &str, operation: &str) -> Option<&OperationUtils<C>> {
        self.group(group).and_then(|g| g.get(operation))
    }

    /// Group names in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

impl<C> Index<&str> for Utils<C> {
    type Output = GroupUtils<C>;

    fn index(&self, group: &str) -> &Self::Output {
        self.groups
            .get(group)
            .unwrap_or_else(|| panic!("no cache utils group '{group}'"))
    }
}

/// The operations of one service group, keyed by camel-cased name.
pub struct GroupUtils<C> {
    operations: BTreeMap<String, OperationUtils<C>>,
}

impl<C> GroupUtils<C> {
    /// Looks up an operation by camel-cased name.
    pub fn get(&self, operation: &str) -> Option<&OperationUtils<C>> {
        self.operations.get(operation)
    }

    /// Camel-cased operation names in sorted order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Number of operations in the group.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True when the group has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<C> Index<&str> for GroupUtils<C> {
    type Output = OperationUtils<C>;

    fn index(&self, operation: &str) -> &Self::Output {
        self.operations
            .get(operation)
            .unwrap_or_else(|| panic!("no cache utils operation '{operation}'"))
    }
}

/// The five cache operations for one GraphQL operation.
pub struct OperationUtils<C> {
    key: QueryKeyFn,
    client: Arc<C>,
}

impl<C: CacheClient> OperationUtils<C> {
    /// The GraphQL operation name.
    pub fn operation(&self) -> &str {
        self.key.operation()
    }

    /// Builds the cache key for `variables`.
    pub fn query_key(&self, variables: Option<&Value>) -> QueryKey {
        self.key.key(variables.cloned())
    }

    /// Marks entries stale. See [`OperationUtils::filter`] for matching.
    pub async fn invalidate(&self, filters: Option<&Filters>) -> Result<(), C::Error> {
        debug!(operation = self.operation(), filtered = has_filters(filters), "invalidate");
        self.client.invalidate_queries(self.filter(filters)).await
    }

    /// Re-executes matching queries.
    pub async fn refetch(&self, filters: Option<&Filters>) -> Result<(), C::Error> {
        debug!(operation = self.operation(), filtered = has_filters(filters), "refetch");
        self.client.refetch_queries(self.filter(filters)).await
    }

    /// Aborts matching in-flight queries.
    pub async fn cancel(&self, filters: Option<&Filters>) -> Result<(), C::Error> {
        debug!(operation = self.operation(), filtered = has_filters(filters), "cancel");
        self.client.cancel_queries(self.filter(filters)).await
    }

    /// Reads the exact key. Never fails; absent entries are `None`.
    pub fn get_data(&self, variables: Option<&Value>) -> Option<Value> {
        self.client.get_query_data(&self.query_key(variables))
    }

    /// Reads the exact key and decodes it, returning `None` on a shape mismatch.
    pub fn get_data_as<T: DeserializeOwned>(&self, variables: Option<&Value>) -> Option<T> {
        self.get_data(variables)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Writes the exact key with a value or an updater function.
    pub fn set_data(&self, data: impl Into<Updater>, variables: Option<&Value>) -> Option<Value> {
        self.client
            .set_query_data(&self.query_key(variables), data.into())
    }

    /// Builds the filter shared by invalidate, refetch and cancel.
    ///
    /// No filters (or an empty map) selects every entry under
    /// `[operation]`. Otherwise an entry matches only when its variables are
    /// an object containing every filter key with an equal value.
    pub fn filter(&self, filters: Option<&Filters>) -> QueryFilter {
        let base = QueryFilter::new(self.key.key(None));
        match filters {
            Some(filters) if !filters.is_empty() => {
                let filters = filters.clone();
                base.with_predicate(move |key| variables_match(key.variables(), &filters))
            }
            _ => base,
        }
    }
}

fn has_filters(filters: Option<&Filters>) -> bool {
    filters.is_some_and(|f| !f.is_empty())
}

fn variables_match(stored: Option<&Value>, filters: &Filters) -> bool {
    let Some(Value::Object(stored)) = stored else {
        return false;
    };
    filters
        .iter()
        .all(|(name, expected)| stored.get(name) == Some(expected))
}
