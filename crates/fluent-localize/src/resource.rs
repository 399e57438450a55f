//! Fetched-resource cache with in-flight deduplication

use crate::error::{L10nError, L10nResult};
use crate::fetch::ResourceFetcher;
use fluent::FluentResource;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// A fetch-and-parse operation shared by every caller of one path.
type SharedLoad = Shared<BoxFuture<'static, L10nResult<Arc<FluentResource>>>>;

/// Parses raw resource text into a bundle-addable [`FluentResource`].
///
/// `path` only labels the error; the text may as well come from an inline
/// string as from a fetched file.
pub fn parse_resource(path: &str, text: String) -> L10nResult<Arc<FluentResource>> {
    match FluentResource::try_new(text) {
        Ok(resource) => Ok(Arc::new(resource)),
        Err((_, errors)) => {
            let error_messages: Vec<String> =
                errors.into_iter().map(|e| format!("{:?}", e)).collect();

            error!(
                "Failed to parse Fluent resource '{}': {:?}",
                path, error_messages
            );

            Err(L10nError::Parse {
                path: path.to_string(),
                errors: error_messages,
            })
        }
    }
}

/// Process-wide cache of fetched translation resources.
///
/// Each distinct path is fetched and parsed at most once: concurrent
/// requests for a path that is still in flight share the pending operation,
/// and requests after settlement get the settled result immediately.
/// Entries are never evicted.
///
/// A failed fetch or parse stays cached too, so every later load of that
/// path observes the original error without retrying. Recovering from a
/// transient failure requires a different path or a fresh cache.
pub struct ResourceCache {
    fetcher: Arc<dyn ResourceFetcher>,
    entries: Mutex<HashMap<String, SharedLoad>>,
}

impl ResourceCache {
    /// Creates an empty cache fetching through `fetcher`.
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Loads and parses the resource at `path`, deduplicating in-flight work.
    pub async fn load(&self, path: &str) -> L10nResult<Arc<FluentResource>> {
        let load = {
            let mut entries = self.entries.lock();
            match entries.get(path) {
                Some(load) => {
                    debug!("Resource cache hit for '{}'", path);
                    load.clone()
                }
                None => {
                    debug!("Resource cache miss for '{}', starting fetch", path);
                    let load = Self::start_load(Arc::clone(&self.fetcher), path);
                    entries.insert(path.to_string(), load.clone());
                    load
                }
            }
        };

        load.await
    }

    /// Whether a load for `path` has been started (settled or not).
    pub fn is_cached(&self, path: &str) -> bool {
        self.entries.lock().contains_key(path)
    }

    fn start_load(fetcher: Arc<dyn ResourceFetcher>, path: &str) -> SharedLoad {
        let path = path.to_string();
        async move {
            let text = fetcher.fetch(&path).await?;
            let resource = parse_resource(&path, text)?;
            info!("Successfully loaded resource '{}'", path);
            Ok(resource)
        }
        .boxed()
        .shared()
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}
