//! Localization cache and lookup for component-based UIs
//!
//! This crate provides the l10n plumbing a localized component needs,
//! built on the Fluent localization system:
//!
//! - A process-wide cache of fetched translation resources with in-flight
//!   deduplication: each distinct resource path is fetched and parsed at
//!   most once, no matter how many components ask for it concurrently
//! - Per-locale message bundles cached per component type, shared by
//!   sibling instances
//! - Locale resolution through an override → instance → global chain
//! - A `localize(key, args)` lookup where a missing key is an absent
//!   value, not an error
//!
//! The fetch transport and the host's notion of a "document language" are
//! seams: implement [`ResourceFetcher`] or [`LanguageTagSink`] to plug in
//! your own.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fluent_localize::{l10n_args, FsFetcher, L10nRegistry, Localizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(L10nRegistry::new(Arc::new(FsFetcher::new("locales"))));
//! let localizer = Localizer::new(Arc::clone(&registry));
//! localizer.set_global_locale("en-US".parse()?);
//!
//! let resource = fluent_localize::parse_resource(
//!     "inline",
//!     "hello = Hello, { $name }!".to_string(),
//! )?;
//! localizer.add_resource_for_locale(resource, None)?;
//!
//! let greeting = localizer.localize("hello", l10n_args!["name" => "Ada"].as_ref(), None)?;
//! assert_eq!(greeting.as_deref(), Some("Hello, Ada!"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod config;
pub mod error;
pub mod fetch;
pub mod locale;
pub mod localizer;
pub mod registry;
pub mod resource;

pub use bundle::{BundleCache, MessageBundle};
pub use config::L10nConfig;
pub use error::{L10nError, L10nResult};
pub use fetch::{FsFetcher, HttpFetcher, ResourceFetcher};
pub use locale::{parse_language_tag, resolve_locale, LanguageTagSink};
pub use localizer::Localizer;
pub use registry::L10nRegistry;
pub use resource::{parse_resource, ResourceCache};

// Re-export commonly used Fluent types
pub use fluent::{FluentArgs, FluentResource, FluentValue};
pub use unic_langid::LanguageIdentifier;
