//! GraphQL fetcher.
//!
//! The Rust counterpart of the fetcher embedded in generated react-query
//! hooks. Both follow the same contract:
//!
//! - `POST {query, variables}` to the endpoint's gateway, or to the
//!   per-request `endpoint` override
//! - `Content-Type: application/json` unless a custom header replaces it
//! - a non-empty `errors` array fails with the first message alone
//! - otherwise resolves with `data`
//!
//! ## Examples
//!
//! ```rust,ignore
//! use gqlforge::fetcher::{FetchOptions, GraphQLFetcher};
//! use serde_json::json;
//!
//! let fetcher = GraphQLFetcher::new("https://api.example.com/graphql")?;
//! let options = FetchOptions::from_value(json!({"customHeaders": {"authorization": "Bearer t"}}));
//! let user: serde_json::Value = fetcher
//!     .fetch_data("query Me { me { id } }", None, Some(options))
//!     .await?;
//! ```

mod executor;
mod options;

pub use executor::GraphQLFetcher;
pub use options::FetchOptions;
