//! Convenient re-exports for application code.

pub use crate::cache::{
    CacheClient, Filters, MemoryCache, QueryKey, QueryKeys, Updater, Utils, UtilsConfig,
    UtilsFactory, UtilsHook, create_query_keys, create_utils_factory, create_utils_hook,
};
pub use crate::error::FetchError;
pub use crate::fetcher::{FetchOptions, GraphQLFetcher};
pub use gqlforge_define::ServiceGroups;
