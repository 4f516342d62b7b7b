//! Public file storage for uploaded images.
//!
//! Files are written below a root directory that the router also serves at
//! `/storage`, so a stored relative path maps directly to a public URL.

use std::io;
use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

/// A directory whose contents are publicly reachable under `{base_url}/storage/`.
#[derive(Debug, Clone)]
pub struct PublicDisk {
    root: PathBuf,
    base_url: String,
}

impl PublicDisk {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `dir` with a fresh unique name.
    ///
    /// Returns the path relative to the disk root, e.g. `portfolio/<uuid>.jpg`.
    pub async fn store(&self, dir: &str, bytes: &[u8], extension: &str) -> io::Result<String> {
        let relative = format!("{dir}/{}.{extension}", Uuid::new_v4());
        let full = self.root.join(&relative);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;
        Ok(relative)
    }

    /// Remove a stored file. A file that is already gone is not an error.
    pub async fn delete(&self, relative: &str) -> io::Result<()> {
        let Some(full) = self.resolve(relative) else {
            tracing::warn!(path = relative, "Refusing to delete path outside public disk");
            return Ok(());
        };
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn exists(&self, relative: &str) -> bool {
        match self.resolve(relative) {
            Some(full) => tokio::fs::try_exists(full).await.unwrap_or(false),
            None => false,
        }
    }

    /// Public URL of a stored file.
    pub fn url(&self, relative: &str) -> String {
        format!("{}/storage/{}", self.base_url, relative.trim_start_matches('/'))
    }

    /// Absolute path for `relative`, or `None` if it would escape the root.
    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let path = Path::new(relative);
        let safe = path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        safe.then(|| self.root.join(path))
    }
}
