//! Process-wide localization state

use crate::config::L10nConfig;
use crate::error::L10nResult;
use crate::fetch::ResourceFetcher;
use crate::locale::{parse_language_tag, LanguageTagSink};
use crate::resource::ResourceCache;
use fluent::FluentResource;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use unic_langid::LanguageIdentifier;

/// Shared localization state: the fetched-resource cache and the global
/// locale.
///
/// One registry serves every localized component type in the process.
/// It is an explicit object rather than static state so tests can inject
/// a fresh one; hand it around behind an [`Arc`].
pub struct L10nRegistry {
    resources: ResourceCache,
    global_locale: RwLock<Option<LanguageIdentifier>>,
    language_sink: Option<Arc<dyn LanguageTagSink>>,
}

impl L10nRegistry {
    /// Creates a registry fetching resources through `fetcher`.
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self {
            resources: ResourceCache::new(fetcher),
            global_locale: RwLock::new(None),
            language_sink: None,
        }
    }

    /// Creates a registry from configuration.
    ///
    /// Builds the fetcher from the configured resource base and applies the
    /// configured global locale, if any.
    pub fn from_config(config: &L10nConfig) -> L10nResult<Self> {
        let registry = Self::new(config.build_fetcher()?);
        if let Some(tag) = &config.global_locale {
            registry.set_global_locale(parse_language_tag(tag)?);
        }
        Ok(registry)
    }

    /// Attaches a sink notified on every global locale change.
    pub fn with_language_sink(mut self, sink: Arc<dyn LanguageTagSink>) -> Self {
        self.language_sink = Some(sink);
        self
    }

    /// The current global locale, if set.
    pub fn global_locale(&self) -> Option<LanguageIdentifier> {
        self.global_locale.read().clone()
    }

    /// Sets the global locale and mirrors it onto the language sink.
    pub fn set_global_locale(&self, locale: LanguageIdentifier) {
        info!("Setting global locale to {}", locale);
        *self.global_locale.write() = Some(locale.clone());
        if let Some(sink) = &self.language_sink {
            sink.set_language_tag(&locale);
        }
    }

    /// Loads the resource at `path` through the shared cache.
    pub async fn load_resource(&self, path: &str) -> L10nResult<Arc<FluentResource>> {
        self.resources.load(path).await
    }

    /// The shared resource cache.
    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }
}

impl std::fmt::Debug for L10nRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("L10nRegistry")
            .field("resources", &self.resources)
            .field("global_locale", &self.global_locale.read())
            .field("language_sink", &self.language_sink.is_some())
            .finish()
    }
}
