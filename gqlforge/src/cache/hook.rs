//! Binding a [`UtilsFactory`] to an ambient cache client.
//!
//! The factory always takes its client explicitly. A hook is the one place
//! that knows where the surrounding context keeps its client (a global, a
//! request extension, a UI context) and fetches it on every call.

use std::fmt;
use std::sync::Arc;

use super::client::CacheClient;
use super::utils::{Utils, UtilsFactory};

type ClientProvider<C> = Arc<dyn Fn() -> Arc<C> + Send + Sync>;

/// A factory paired with a client provider.
pub struct UtilsHook<C> {
    factory: UtilsFactory,
    provider: ClientProvider<C>,
}

/// Pairs `factory` with the function that yields the current client.
///
/// ## Examples
///
/// ```
/// use std::sync::Arc;
/// use gqlforge::cache::{MemoryCache, UtilsConfig, create_query_keys, create_utils_factory, create_utils_hook};
/// use gqlforge_define::ServiceGroups;
///
/// let shared = Arc::new(MemoryCache::new());
/// let factory = create_utils_factory(UtilsConfig::new(
///     create_query_keys(["GetUser"]),
///     ServiceGroups::infer(["GetUser"]),
/// ));
///
/// let client = Arc::clone(&shared);
/// let use_utils = create_utils_hook(factory, move || Arc::clone(&client));
///
/// let utils = use_utils.call();
/// assert!(utils.operation("users", "getUser").is_some());
/// ```
pub fn create_utils_hook<C, P>(factory: UtilsFactory, provider: P) -> UtilsHook<C>
where
    C: CacheClient,
    P: Fn() -> Arc<C> + Send + Sync + 'static,
{
    UtilsHook {
        factory,
        provider: Arc::new(provider),
    }
}

impl<C: CacheClient> UtilsHook<C> {
    /// Fetches the ambient client and builds a fresh [`Utils`] over it.
    pub fn call(&self) -> Utils<C> {
        self.factory.build((self.provider)())
    }
}

impl<C> Clone for UtilsHook<C> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<C> fmt::Debug for UtilsHook<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UtilsHook")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}
