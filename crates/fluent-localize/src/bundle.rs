//! Per-locale message bundles and the per-type bundle cache

use crate::error::{L10nError, L10nResult};
use fluent::{FluentArgs, FluentError, FluentResource};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// A per-locale container of compiled messages.
///
/// The concurrent memoizer keeps the bundle `Send + Sync` so one bundle can
/// be shared by every instance of a component type.
pub type MessageBundle = fluent_bundle::concurrent::FluentBundle<Arc<FluentResource>>;

fn new_bundle(locale: &LanguageIdentifier) -> MessageBundle {
    let mut bundle = MessageBundle::new_concurrent(vec![locale.clone()]);
    // Disable Unicode isolation marks for plain-text output
    bundle.set_use_isolating(false);
    bundle
}

/// Compiled message bundles for one component type, keyed by locale.
///
/// Bundles are created lazily on first access and live as long as the cache.
/// Sibling instances of a component type share one `BundleCache`; distinct
/// component types each get their own.
pub struct BundleCache {
    bundles: Mutex<HashMap<LanguageIdentifier, Arc<RwLock<MessageBundle>>>>,
}

impl BundleCache {
    /// Creates an empty bundle cache.
    pub fn new() -> Self {
        Self {
            bundles: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the bundle for `locale`, creating an empty one if absent.
    pub fn get_or_create(&self, locale: &LanguageIdentifier) -> Arc<RwLock<MessageBundle>> {
        let mut bundles = self.bundles.lock();
        Arc::clone(bundles.entry(locale.clone()).or_insert_with(|| {
            debug!("Creating bundle for locale {}", locale);
            Arc::new(RwLock::new(new_bundle(locale)))
        }))
    }

    /// Returns the bundle for `locale` if one exists.
    pub fn get(&self, locale: &LanguageIdentifier) -> Option<Arc<RwLock<MessageBundle>>> {
        self.bundles.lock().get(locale).map(Arc::clone)
    }

    /// Whether a bundle exists for `locale`.
    pub fn contains(&self, locale: &LanguageIdentifier) -> bool {
        self.bundles.lock().contains_key(locale)
    }

    /// All locales a bundle has been created for.
    pub fn locales(&self) -> Vec<LanguageIdentifier> {
        self.bundles.lock().keys().cloned().collect()
    }
}

impl Default for BundleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BundleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleCache")
            .field("locales", &self.locales())
            .finish()
    }
}

/// Merges a compiled resource into `bundle`.
///
/// Re-adding messages that already exist is a no-op, so merging the same
/// resource into a bundle twice succeeds; any other bundle error fails the
/// merge.
pub(crate) fn add_resource_to_bundle(
    locale: &LanguageIdentifier,
    bundle: &RwLock<MessageBundle>,
    resource: Arc<FluentResource>,
) -> L10nResult<()> {
    if let Err(errors) = bundle.write().add_resource(resource) {
        let (overriding, fatal): (Vec<FluentError>, Vec<FluentError>) = errors
            .into_iter()
            .partition(|e| matches!(e, FluentError::Overriding { .. }));

        if !overriding.is_empty() {
            warn!(
                "Skipped {} already-present messages while adding resource to bundle for locale {}",
                overriding.len(),
                locale
            );
        }

        if !fatal.is_empty() {
            let error_messages: Vec<String> =
                fatal.into_iter().map(|e| format!("{:?}", e)).collect();
            return Err(L10nError::Bundle {
                locale: locale.to_string(),
                errors: error_messages,
            });
        }
    }

    debug!("Added resource to bundle for locale {}", locale);
    Ok(())
}

/// Looks up `key` in `bundle` and formats it with `args`.
///
/// Returns `None` when the key is absent or the message carries no value.
/// Formatting errors do not fail the lookup: Fluent substitutes fallback
/// output and the errors are logged.
pub(crate) fn format_in_bundle(
    bundle: &MessageBundle,
    key: &str,
    args: Option<&FluentArgs>,
) -> Option<String> {
    let message = bundle.get_message(key)?;
    let pattern = message.value()?;

    let mut errors = Vec::new();
    let formatted = bundle.format_pattern(pattern, args, &mut errors);

    if !errors.is_empty() {
        warn!("Formatting errors for message '{}': {:?}", key, errors);
    }

    Some(formatted.into_owned())
}

/// Macro to create an optional set of formatting arguments
#[macro_export]
macro_rules! l10n_args {
    () => {
        None
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FluentArgs::new();
        $(
            args.set($key, $value);
        )+
        Some(args)
    }};
}
