//! Cache utilities: query keys and the grouped invalidate/refetch/cancel facade.
//!
//! ## Building blocks
//!
//! - [`create_query_keys`] - `[operation]` / `[operation, variables]` key functions
//! - [`CacheClient`] - the query-cache contract the facade forwards to
//! - [`create_utils_factory`] - keys + service groups -> [`UtilsFactory`]
//! - [`UtilsFactory::build`] - client -> [`Utils`]
//! - [`create_utils_hook`] - factory + ambient client provider -> [`UtilsHook`]
//! - [`MemoryCache`] - in-memory [`CacheClient`]
//!
//! ## Filter semantics
//!
//! `invalidate`, `refetch` and `cancel` share one rule: without filters they
//! hit every entry of the operation regardless of variables; with filters
//! they hit only entries whose variables contain every filter key with an
//! equal value.

mod client;
mod hook;
mod key;
mod memory;
mod utils;

pub use client::{BoxFuture, CacheClient, KeyPredicate, QueryFilter, Updater};
pub use hook::{UtilsHook, create_utils_hook};
pub use key::{QueryKey, QueryKeyFn, QueryKeys, create_query_keys};
pub use memory::{FetchStatus, MemoryCache, MemoryCacheError, QueryFn};
pub use utils::{
    Filters, GroupUtils, OperationUtils, Utils, UtilsConfig, UtilsFactory, create_utils_factory,
};
