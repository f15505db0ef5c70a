//! GraphQL fetcher errors.

use thiserror::Error;

/// Errors from [`GraphQLFetcher`](crate::fetcher::GraphQLFetcher).
///
/// A response carrying GraphQL `errors` surfaces as [`FetchError::GraphQL`]
/// holding only the first error's message. Locations, paths, extensions and
/// any further errors are dropped, and the variant displays as the bare
/// message.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The response carried a non-empty `errors` array.
    #[error("{0}")]
    GraphQL(String),

    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway or override endpoint is not a valid URL.
    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A header name or value cannot be sent.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The bare GraphQL error message, if this is a GraphQL failure.
    pub fn graphql_message(&self) -> Option<&str> {
        match self {
            Self::GraphQL(message) => Some(message),
            _ => None,
        }
    }
}
