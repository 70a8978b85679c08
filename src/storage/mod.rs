//! # Storage Collaborators
//!
//! Publishing the composed file is a capability injected by the caller, not a
//! process-wide singleton: anything that can take a local file and hand back a
//! shareable link implements [`StorageClient`]. Failure is an explicit
//! [`StorageError`](crate::error::StorageError) variant, never an empty URL.
//!
//! [`LocalStorage`] is the stock backend: it copies the file into a target
//! directory and returns a `file://` link. Cloud backends plug in at the same
//! trait without touching the pipeline.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::error::{Result, StorageError};

/// A shareable link to a published file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    url: String,
}

impl ShareLink {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for ShareLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// Caller-injected capability that persists a file and returns a public link
pub trait StorageClient {
    fn upload(&self, path: &Path)
        -> impl std::future::Future<Output = Result<ShareLink>> + Send;
}

/// Filesystem-backed storage: copy into a directory, link with `file://`
pub struct LocalStorage {
    destination: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(destination: P) -> Self {
        Self { destination: destination.into() }
    }
}

impl StorageClient for LocalStorage {
    async fn upload(&self, path: &Path) -> Result<ShareLink> {
        if !path.exists() {
            return Err(StorageError::SourceMissing {
                path: path.display().to_string(),
            }
            .into());
        }

        let file_name = path.file_name().ok_or_else(|| StorageError::SourceMissing {
            path: path.display().to_string(),
        })?;

        fs::create_dir_all(&self.destination).await.map_err(|_| {
            StorageError::DestinationUnavailable {
                destination: self.destination.display().to_string(),
            }
        })?;

        let target = self.destination.join(file_name);
        fs::copy(path, &target).await.map_err(|e| StorageError::UploadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let absolute = target.canonicalize().unwrap_or(target);
        let link = ShareLink::new(format!("file://{}", absolute.display()));
        info!("Published {} -> {}", path.display(), link);
        Ok(link)
    }
}
