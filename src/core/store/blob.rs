//! Filesystem-backed blob store

use std::fs;
use std::path::PathBuf;

use super::{BlobHandle, BlobStore, StoreError};

/// Stores uploaded bytes under a root directory
///
/// Public URLs are built from `public_base_url` when one is configured, and
/// point at the file itself otherwise.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    fn blob_path(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl BlobStore for FsBlobStore {
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<BlobHandle, StoreError> {
        let target = self.blob_path(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::write(&target, bytes).map_err(|e| StoreError::io(&target, e))?;

        tracing::info!("Uploaded {} bytes to: {}", bytes.len(), target.display());
        Ok(BlobHandle {
            path: path.to_string(),
        })
    }

    fn public_url(&self, handle: &BlobHandle) -> Result<String, StoreError> {
        if let Some(base) = &self.public_base_url {
            return Ok(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                handle.path.trim_start_matches('/')
            ));
        }

        let target = self.blob_path(&handle.path);
        let absolute = target
            .canonicalize()
            .map_err(|e| StoreError::io(&target, e))?;
        Ok(file_url(&absolute.to_string_lossy()))
    }
}

/// `file://` URL for an absolute path, dropping the Windows `\\?\` prefix
/// that `canonicalize` adds
fn file_url(absolute: &str) -> String {
    let path = if let Some(unc) = absolute.strip_prefix(r"\\?\UNC\") {
        format!(r"\\{}", unc)
    } else {
        absolute
            .strip_prefix(r"\\?\")
            .unwrap_or(absolute)
            .to_string()
    };
    let path = path.replace('\\', "/");

    if let Some(share) = path.strip_prefix("//") {
        format!("file://{}", share)
    } else if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}
