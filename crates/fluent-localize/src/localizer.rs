//! Per-instance localization API

use crate::bundle::{add_resource_to_bundle, format_in_bundle, BundleCache, MessageBundle};
use crate::error::{L10nError, L10nResult};
use crate::locale;
use crate::registry::L10nRegistry;
use fluent::{FluentArgs, FluentResource};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Localization handle for one component instance.
///
/// Create one `Localizer` per component type with [`Localizer::new`] and
/// hand each instance its own copy via [`Localizer::instance`] (or
/// `clone()` to also carry over the instance locale). Copies share the
/// type's bundle cache and the process-wide registry, so resources loaded
/// by one instance are visible to its siblings, while distinct component
/// types keep separate bundles.
#[derive(Debug, Clone)]
pub struct Localizer {
    registry: Arc<L10nRegistry>,
    bundles: Arc<BundleCache>,
    locale: Option<LanguageIdentifier>,
}

impl Localizer {
    /// Creates the localizer for a component type, with a fresh bundle
    /// cache.
    pub fn new(registry: Arc<L10nRegistry>) -> Self {
        Self {
            registry,
            bundles: Arc::new(BundleCache::new()),
            locale: None,
        }
    }

    /// Creates a sibling instance: same bundles and registry, no instance
    /// locale.
    pub fn instance(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            bundles: Arc::clone(&self.bundles),
            locale: None,
        }
    }

    /// The shared registry this localizer resolves through.
    pub fn registry(&self) -> &Arc<L10nRegistry> {
        &self.registry
    }

    /// Resolves the effective locale for a lookup.
    ///
    /// The explicit `locale` argument wins over the instance locale, which
    /// wins over the global locale; with none of them set the resolution
    /// fails with [`L10nError::UnsetLocale`].
    pub fn resolve_locale(
        &self,
        explicit: Option<&LanguageIdentifier>,
    ) -> L10nResult<LanguageIdentifier> {
        let global = self.registry.global_locale();
        locale::resolve_locale(explicit, self.locale.as_ref(), global.as_ref())
    }

    /// Gets the bundle for the given locale.
    ///
    /// If no bundle exists for the resolved locale yet, an empty one is
    /// created and cached. Pass `None` to use the instance or global
    /// locale.
    pub fn get_locale_bundle(
        &self,
        locale: Option<&LanguageIdentifier>,
    ) -> L10nResult<Arc<RwLock<MessageBundle>>> {
        let resolved = self.resolve_locale(locale)?;
        Ok(self.bundles.get_or_create(&resolved))
    }

    /// Adds an already-compiled resource to the given locale's bundle and
    /// returns that bundle.
    pub fn add_resource_for_locale(
        &self,
        resource: Arc<FluentResource>,
        locale: Option<&LanguageIdentifier>,
    ) -> L10nResult<Arc<RwLock<MessageBundle>>> {
        let resolved = self.resolve_locale(locale)?;
        let bundle = self.bundles.get_or_create(&resolved);
        add_resource_to_bundle(&resolved, &bundle, resource)?;
        Ok(bundle)
    }

    /// Loads the resource at `path` and merges it into the given locale's
    /// bundle.
    ///
    /// The fetch goes through the registry's shared resource cache, so
    /// repeated calls with the same path never re-fetch, and concurrent
    /// callers share one in-flight operation regardless of their locale.
    /// Loading one path for two locales yields two bundles that each
    /// contain the resource's messages.
    pub async fn load_resource_for_locale(
        &self,
        path: &str,
        locale: Option<&LanguageIdentifier>,
    ) -> L10nResult<Arc<RwLock<MessageBundle>>> {
        let resource = self.registry.load_resource(path).await?;
        self.add_resource_for_locale(resource, locale)
    }

    /// Localizes `key` with the given arguments.
    ///
    /// Returns `Ok(None)` when the key is not present in the resolved
    /// locale's bundle; a missing key is not an error. Fails only when no
    /// locale can be resolved.
    pub fn localize(
        &self,
        key: &str,
        args: Option<&FluentArgs>,
        locale: Option<&LanguageIdentifier>,
    ) -> L10nResult<Option<String>> {
        let bundle = self.get_locale_bundle(locale)?;
        let result = format_in_bundle(&bundle.read(), key, args);
        Ok(result)
    }

    /// The instance locale, if set.
    pub fn locale(&self) -> Option<&LanguageIdentifier> {
        self.locale.as_ref()
    }

    /// Sets the instance locale.
    ///
    /// Fails with [`L10nError::UnloadedLocale`] when no bundle exists for
    /// `locale` yet; load or add a resource for it first.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) -> L10nResult<()> {
        if !self.bundles.contains(&locale) {
            return Err(L10nError::UnloadedLocale {
                locale: locale.to_string(),
            });
        }
        debug!("Setting instance locale to {}", locale);
        self.locale = Some(locale);
        Ok(())
    }

    /// Clears the instance locale, falling back to the global locale.
    pub fn clear_locale(&mut self) {
        self.locale = None;
    }

    /// The global locale shared by every localized type.
    pub fn global_locale(&self) -> Option<LanguageIdentifier> {
        self.registry.global_locale()
    }

    /// Sets the global locale through the registry.
    pub fn set_global_locale(&self, locale: LanguageIdentifier) {
        self.registry.set_global_locale(locale);
    }
}
