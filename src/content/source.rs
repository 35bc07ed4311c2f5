//! Content sources - where raw documents are fetched from
//!
//! A source resolves paths relative to the configured content root. The
//! root is either a remote host serving static files or a local directory
//! holding the same tree.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::helpers::{is_remote, join_url};

/// Errors raised while fetching a single document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path escapes the content root: {0}")]
    InvalidPath(String),
}

/// Something that can hand out raw documents by relative path
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the text at `path`, relative to the content root
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;

    /// Where `path` resolves to, for diagnostics
    fn locate(&self, path: &str) -> String;
}

/// Fetches documents over HTTP from a remote content root
pub struct HttpSource {
    base: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for a base URL
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(base, reqwest::Client::new())
    }

    /// Create a source sharing an existing client
    pub fn with_client(base: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base: base.into(),
            client,
        }
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.locate(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn locate(&self, path: &str) -> String {
        join_url(&self.base, path)
    }
}

/// Reads documents from a local static-asset directory
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at a directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a relative path, refusing anything that climbs out of the root
    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ContentSource for DirSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full = self.resolve(path)?;
        tracing::debug!("Reading {:?}", full);

        tokio::fs::read_to_string(&full)
            .await
            .map_err(|source| FetchError::Io { path: full, source })
    }

    fn locate(&self, path: &str) -> String {
        self.root
            .join(path.trim_start_matches('/'))
            .to_string_lossy()
            .to_string()
    }
}

/// Pick a source for a configured content root
///
/// `http(s)://` roots are fetched remotely. Anything else is a directory,
/// with an optional `file://` prefix; relative directories are resolved
/// against `base_dir`.
pub fn source_for(root: &str, base_dir: &Path) -> Arc<dyn ContentSource> {
    if is_remote(root) {
        return Arc::new(HttpSource::new(root));
    }

    let dir = Path::new(root.strip_prefix("file://").unwrap_or(root));
    if dir.is_absolute() {
        Arc::new(DirSource::new(dir))
    } else {
        Arc::new(DirSource::new(base_dir.join(dir)))
    }
}
