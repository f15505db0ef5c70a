//! Cache key construction.
//!
//! A [`QueryKey`] is the ordered sequence `[operation]` or
//! `[operation, variables]`. The one-element form is a strict prefix of every
//! two-element form for the same operation, which is what lets "everything
//! for this operation" and "this exact variable set" address different
//! slots.

use std::collections::BTreeMap;
use std::ops::Index;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

/// An ordered cache key: operation name plus optional variables.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryKey {
    operation: String,
    variables: Option<Value>,
}

impl QueryKey {
    /// Creates a key for `operation`, optionally scoped to `variables`.
    pub fn new(operation: impl Into<String>, variables: Option<Value>) -> Self {
        Self {
            operation: operation.into(),
            variables,
        }
    }

    /// The first segment.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The second segment, when present.
    pub fn variables(&self) -> Option<&Value> {
        self.variables.as_ref()
    }

    /// Number of segments (1 or 2).
    pub fn len(&self) -> usize {
        if self.variables.is_some() { 2 } else { 1 }
    }

    /// Always false; a key has at least the operation segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The key as a JSON array.
    pub fn segments(&self) -> Vec<Value> {
        let mut segments = vec![Value::String(self.operation.clone())];
        if let Some(vars) = &self.variables {
            segments.push(vars.clone());
        }
        segments
    }

    /// True when `prefix` equals this key or its first `prefix.len()` segments.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        if self.operation != prefix.operation {
            return false;
        }
        match &prefix.variables {
            None => true,
            Some(vars) => self.variables.as_ref() == Some(vars),
        }
    }

    /// Stable string form used to index entries in a cache.
    ///
    /// Object keys are emitted in sorted order, so two keys with equal
    /// variables always hash the same regardless of construction order.
    pub fn hash_key(&self) -> String {
        Value::Array(self.segments()).to_string()
    }
}

impl Serialize for QueryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        seq.serialize_element(&self.operation)?;
        if let Some(vars) = &self.variables {
            seq.serialize_element(vars)?;
        }
        seq.end()
    }
}

/// Key-construction function for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKeyFn {
    operation: String,
}

impl QueryKeyFn {
    /// The operation this function builds keys for.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Builds `[operation]` for `None`, `[operation, variables]` otherwise.
    pub fn key(&self, variables: Option<Value>) -> QueryKey {
        QueryKey::new(self.operation.clone(), variables)
    }
}

/// Operation name to [`QueryKeyFn`].
///
/// ## Examples
///
/// ```
/// use gqlforge::cache::create_query_keys;
/// use serde_json::json;
///
/// let keys = create_query_keys(["GetUser"]);
/// assert_eq!(keys["GetUser"].key(None).segments(), vec![json!("GetUser")]);
/// assert_eq!(
///     keys["GetUser"].key(Some(json!({"id": 1}))).segments(),
///     vec![json!("GetUser"), json!({"id": 1})]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryKeys {
    keys: BTreeMap<String, QueryKeyFn>,
}

impl QueryKeys {
    /// Looks up the key function for an operation.
    pub fn get(&self, operation: &str) -> Option<&QueryKeyFn> {
        self.keys.get(operation)
    }

    /// True when the operation is known.
    pub fn contains(&self, operation: &str) -> bool {
        self.keys.contains_key(operation)
    }

    /// Operation names in sorted order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when there are no operations.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Index<&str> for QueryKeys {
    type Output = QueryKeyFn;

    fn index(&self, operation: &str) -> &Self::Output {
        self.keys
            .get(operation)
            .unwrap_or_else(|| panic!("no query key for operation '{operation}'"))
    }
}

/// Builds a key function for every operation name.
pub fn create_query_keys<I, S>(operations: I) -> QueryKeys
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let keys = operations
        .into_iter()
        .map(|op| {
            let operation: String = op.into();
            (operation.clone(), QueryKeyFn { operation })
        })
        .collect();
    QueryKeys { keys }
}
