//! Resource transport for translation files
//!
//! The fetch transport is a collaborator of the cache, not part of it: the
//! cache only needs something that turns a path into raw resource text.
//! Hosts plug in their own transport by implementing [`ResourceFetcher`];
//! the crate ships an HTTP and a filesystem implementation.

use crate::error::{L10nError, L10nResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Turns a resource path into raw translation-resource text.
#[async_trait]
pub trait ResourceFetcher: Send + Sync + 'static {
    /// Fetches the raw text behind `path`.
    async fn fetch(&self, path: &str) -> L10nResult<String>;
}

/// Fetches resources over HTTP(S) with a pooled client.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpFetcher {
    /// Creates a fetcher that expects absolute URLs as paths.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Creates a fetcher resolving paths against `base_url`.
    ///
    /// Relative resolution follows URL join semantics, so a base that is
    /// meant as a directory needs a trailing slash.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Some(base_url),
        }
    }

    fn resolve_url(&self, path: &str) -> L10nResult<Url> {
        let resolved = match &self.base_url {
            Some(base) => base.join(path),
            None => path.parse(),
        };
        resolved.map_err(|e| L10nError::Fetch {
            path: path.to_string(),
            message: format!("invalid URL: {}", e),
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> L10nResult<String> {
        let url = self.resolve_url(path)?;
        debug!("Fetching resource from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| fetch_error(path, &e))?;

        response.text().await.map_err(|e| fetch_error(path, &e))
    }
}

/// Maps a reqwest failure to a fetch error with a stable message shape.
fn fetch_error(path: &str, err: &reqwest::Error) -> L10nError {
    let message = if err.is_timeout() {
        "request timeout".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else if let Some(status) = err.status() {
        format!("HTTP error: {}", status.as_u16())
    } else {
        format!("request failed: {}", err)
    };
    L10nError::Fetch {
        path: path.to_string(),
        message,
    }
}

/// Fetches resources from the local filesystem.
pub struct FsFetcher {
    base_dir: PathBuf,
}

impl FsFetcher {
    /// Creates a fetcher reading paths relative to `base_dir`.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// The directory resource paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl ResourceFetcher for FsFetcher {
    async fn fetch(&self, path: &str) -> L10nResult<String> {
        let resource_path = self.base_dir.join(path);
        debug!("Reading resource file: {:?}", resource_path);

        tokio::fs::read_to_string(&resource_path)
            .await
            .map_err(|e| L10nError::Fetch {
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}
