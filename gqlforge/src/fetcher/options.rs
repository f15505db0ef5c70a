//! Per-request fetcher options.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Per-request overrides.
///
/// Callers pass either a flat header map or a `{customHeaders, endpoint}`
/// wrapper. The two are told apart by key presence alone: an object with a
/// `customHeaders` or `endpoint` key is a wrapper; anything else is treated
/// entirely as headers. Older call sites that only ever passed headers keep
/// working that way.
///
/// ## Examples
///
/// ```
/// use gqlforge::fetcher::FetchOptions;
/// use serde_json::json;
///
/// let flat = FetchOptions::from_value(json!({"authorization": "Bearer t"}));
/// assert_eq!(flat.headers().get("authorization").map(String::as_str), Some("Bearer t"));
/// assert_eq!(flat.endpoint(), None);
///
/// let wrapped = FetchOptions::from_value(json!({"endpoint": "https://other.test/graphql"}));
/// assert_eq!(wrapped.endpoint(), Some("https://other.test/graphql"));
/// assert!(wrapped.headers().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum FetchOptions {
    /// Flat header map.
    Headers(BTreeMap<String, String>),
    /// Wrapper with optional headers and endpoint override.
    Request {
        /// Extra headers, applied last.
        custom_headers: BTreeMap<String, String>,
        /// Replaces the configured gateway for this call.
        endpoint: Option<String>,
    },
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::Headers(BTreeMap::new())
    }
}

impl FetchOptions {
    /// Flat header options.
    pub fn headers_only(headers: BTreeMap<String, String>) -> Self {
        Self::Headers(headers)
    }

    /// Wrapper options.
    pub fn request(custom_headers: BTreeMap<String, String>, endpoint: Option<String>) -> Self {
        Self::Request {
            custom_headers,
            endpoint,
        }
    }

    /// Interprets a JSON value the way the generated fetcher does.
    ///
    /// Non-object values yield empty options. Non-string header values are
    /// sent in their JSON text form.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        if map.contains_key("customHeaders") || map.contains_key("endpoint") {
            let custom_headers = match map.get("customHeaders") {
                Some(Value::Object(headers)) => header_map(headers),
                _ => BTreeMap::new(),
            };
            let endpoint = map
                .get("endpoint")
                .and_then(Value::as_str)
                .filter(|e| !e.is_empty())
                .map(str::to_string);
            Self::Request {
                custom_headers,
                endpoint,
            }
        } else {
            Self::Headers(header_map(&map))
        }
    }

    /// Headers to merge over the defaults.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Headers(headers) => headers,
            Self::Request { custom_headers, .. } => custom_headers,
        }
    }

    /// Endpoint override, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Headers(_) => None,
            Self::Request { endpoint, .. } => endpoint.as_deref(),
        }
    }
}

impl From<Value> for FetchOptions {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn header_map(map: &Map<String, Value>) -> BTreeMap<String, String> {
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.clone(), value)
        })
        .collect()
}
