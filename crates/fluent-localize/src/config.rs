//! Configuration for the localization registry

use crate::error::{L10nError, L10nResult};
use crate::fetch::{FsFetcher, HttpFetcher, ResourceFetcher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// Default directory resources are read from when no base is configured.
const DEFAULT_RESOURCE_BASE: &str = "locales";

/// Localization settings, embeddable in a host application's config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct L10nConfig {
    /// Initial global locale, e.g. `"en-US"`. Unset leaves the global
    /// locale empty until the host assigns one.
    pub global_locale: Option<String>,
    /// Where resources are fetched from: an `http(s)` base URL or a
    /// directory. Defaults to the `locales` directory.
    pub resource_base: Option<String>,
}

impl L10nConfig {
    /// Builds the fetcher matching the configured resource base.
    pub fn build_fetcher(&self) -> L10nResult<Arc<dyn ResourceFetcher>> {
        let base = self.resource_base.as_deref().unwrap_or(DEFAULT_RESOURCE_BASE);

        if base.starts_with("http://") || base.starts_with("https://") {
            let base_url: Url = base.parse().map_err(|e| L10nError::Fetch {
                path: base.to_string(),
                message: format!("invalid base URL: {}", e),
            })?;
            Ok(Arc::new(HttpFetcher::with_base_url(base_url)))
        } else {
            Ok(Arc::new(FsFetcher::new(base)))
        }
    }
}
