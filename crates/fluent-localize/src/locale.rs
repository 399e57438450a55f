//! Locale resolution and language tag utilities

use crate::error::{L10nError, L10nResult};
use unic_langid::LanguageIdentifier;

/// Resolves the effective locale from the resolution chain.
///
/// The chain is ordered: explicit override, then the instance locale, then
/// the global locale. The first one that is set wins. When the whole chain
/// is empty the lookup fails with [`L10nError::UnsetLocale`].
pub fn resolve_locale(
    explicit: Option<&LanguageIdentifier>,
    instance: Option<&LanguageIdentifier>,
    global: Option<&LanguageIdentifier>,
) -> L10nResult<LanguageIdentifier> {
    explicit
        .or(instance)
        .or(global)
        .cloned()
        .ok_or(L10nError::UnsetLocale)
}

/// Parses a language tag (e.g. `"en-US"`) into a [`LanguageIdentifier`].
pub fn parse_language_tag(tag: &str) -> L10nResult<LanguageIdentifier> {
    tag.parse()
        .map_err(|_| L10nError::InvalidLanguageId(tag.to_string()))
}

/// Receives the global locale whenever it changes.
///
/// Hosts use this to mirror the locale onto whatever their environment
/// treats as the document language, e.g. the `lang` attribute of the
/// document element.
pub trait LanguageTagSink: Send + Sync {
    /// Called with the new global locale after it has been stored.
    fn set_language_tag(&self, tag: &LanguageIdentifier);
}
