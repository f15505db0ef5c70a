//! Grouping of operation names into services.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::naming::infer_service_name;

/// Service name to ordered operation names.
///
/// Every operation appears in exactly one group. Inferred groups put
/// unmatched operations under `"general"`; explicit groups are taken as
/// given.
///
/// Serializes as a plain `{service: [operation, ...]}` map, which is the
/// manual override surface for application authors. An operation-to-service
/// index is kept beside the map, so lookups and inserts are logarithmic.
///
/// ## Examples
///
/// ```
/// use gqlforge_define::ServiceGroups;
///
/// let groups = ServiceGroups::infer(["GetUserProfile", "GetUserSettings", "Ping"]);
/// assert_eq!(groups.operations("users"), Some(&["GetUserProfile".to_string(), "GetUserSettings".to_string()][..]));
/// assert_eq!(groups.service_of("Ping"), Some("general"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct ServiceGroups {
    groups: BTreeMap<String, Vec<String>>,
    /// Operation to the first service listing it.
    placed: BTreeMap<String, String>,
}

impl From<BTreeMap<String, Vec<String>>> for ServiceGroups {
    fn from(groups: BTreeMap<String, Vec<String>>) -> Self {
        Self::from_map(groups)
    }
}

impl From<ServiceGroups> for BTreeMap<String, Vec<String>> {
    fn from(groups: ServiceGroups) -> Self {
        groups.into_inner()
    }
}

impl ServiceGroups {
    /// Creates an empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups operations by [`infer_service_name`], keeping first-seen order
    /// within each group and dropping repeated names.
    pub fn infer<I, S>(operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups = Self::new();
        for op in operations {
            let op = op.as_ref();
            groups.insert(infer_service_name(op), op);
        }
        groups
    }

    /// Wraps an explicit grouping, bypassing inference.
    ///
    /// An operation listed under several services resolves to the first one
    /// in sorted service order.
    pub fn from_map(groups: BTreeMap<String, Vec<String>>) -> Self {
        let mut placed = BTreeMap::new();
        for (service, ops) in &groups {
            for op in ops {
                placed.entry(op.clone()).or_insert_with(|| service.clone());
            }
        }
        Self { groups, placed }
    }

    /// Adds an operation to a service unless it is already grouped.
    ///
    /// Returns false when the operation was already present in any group.
    pub fn insert(&mut self, service: impl Into<String>, operation: &str) -> bool {
        if self.placed.contains_key(operation) {
            return false;
        }
        let service = service.into();
        self.groups
            .entry(service.clone())
            .or_default()
            .push(operation.to_string());
        self.placed.insert(operation.to_string(), service);
        true
    }

    /// Operations of one service.
    pub fn operations(&self, service: &str) -> Option<&[String]> {
        self.groups.get(service).map(Vec::as_slice)
    }

    /// Finds which service an operation was placed in.
    pub fn service_of(&self, operation: &str) -> Option<&str> {
        self.placed.get(operation).map(String::as_str)
    }

    /// Service names in sorted order.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterates `(service, operations)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(service, ops)| (service.as_str(), ops.as_slice()))
    }

    /// Total number of grouped operations.
    pub fn operation_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// True when no operations are grouped.
    pub fn is_empty(&self) -> bool {
        self.operation_count() == 0
    }

    /// Consumes the grouping, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.groups
    }
}
