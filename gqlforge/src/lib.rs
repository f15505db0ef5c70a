//! Runtime support for gqlforge-generated GraphQL clients.
//!
//! The generator turns named endpoints into typed hooks; this crate provides
//! what those hooks and application code use at request time.
//!
//! ## Features
//!
//! - **Query keys**: `[operation]` / `[operation, variables]` cache keys
//! - **Cache utilities facade**: `invalidate`, `refetch`, `get_data`,
//!   `set_data`, `cancel` per operation, grouped by service
//! - **Pluggable cache client**: any [`cache::CacheClient`], with an
//!   in-memory [`cache::MemoryCache`] included
//! - **GraphQL fetcher**: POST-with-JSON transport built on `reqwest`
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use gqlforge::prelude::*;
//! use serde_json::json;
//!
//! let operations = ["GetUser", "UpdateUser"];
//! let factory = create_utils_factory(UtilsConfig::new(
//!     create_query_keys(operations),
//!     ServiceGroups::infer(operations),
//! ));
//!
//! let utils = factory.build(Arc::new(MemoryCache::new()));
//! let vars = json!({"id": 1});
//! utils["users"]["getUser"].set_data(json!({"name": "A"}), Some(&vars));
//! assert_eq!(utils["users"]["getUser"].get_data(Some(&vars)), Some(json!({"name": "A"})));
//! ```

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod prelude;

pub use error::FetchError;
pub use fetcher::{FetchOptions, GraphQLFetcher};
