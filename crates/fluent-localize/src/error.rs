//! Error types for localization operations

use thiserror::Error;

/// Errors that can occur during localization operations
///
/// The enum is `Clone` because a failed fetch-and-parse operation stays in
/// the resource cache and every caller sharing that in-flight operation
/// receives the same error value.
#[derive(Error, Debug, Clone)]
pub enum L10nError {
    /// No locale could be resolved from the override, instance and global chain
    #[error("no locale set: provide one explicitly or set an instance or global locale")]
    UnsetLocale,

    /// An instance locale was assigned before any bundle existed for it
    #[error("no resources loaded for locale: {locale}")]
    UnloadedLocale { locale: String },

    /// Failed to parse a language identifier
    #[error("invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Failed to fetch a resource from its path
    #[error("failed to fetch resource '{path}': {message}")]
    Fetch { path: String, message: String },

    /// Failed to parse fetched text as a Fluent resource
    #[error("failed to parse resource '{path}': {errors:?}")]
    Parse { path: String, errors: Vec<String> },

    /// Failed to add a compiled resource to a locale's bundle
    #[error("failed to add resource to bundle for locale {locale}: {errors:?}")]
    Bundle { locale: String, errors: Vec<String> },
}

/// Result type for localization operations
pub type L10nResult<T> = Result<T, L10nError>;
