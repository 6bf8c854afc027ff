//! Document and blob storage backends

pub mod blob;
pub mod document;

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

pub use blob::FsBlobStore;
pub use document::FsDocumentStore;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    /// Documents are JSON objects; anything else is rejected on write
    #[error("document {0} must be a JSON object")]
    NotAnObject(DocumentRef),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Location of a single document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    pub collection: String,
    pub id: String,
}

impl DocumentRef {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Write behaviour for [`DocumentStore::set`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Merge into the stored document instead of replacing it
    pub merge: bool,
}

impl SetOptions {
    pub fn merge() -> Self {
        Self { merge: true }
    }
}

/// A key-document database holding one JSON object per key
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, `None` if it does not exist
    fn get(&self, doc: &DocumentRef) -> Result<Option<Value>, StoreError>;

    /// Write a document
    fn set(&self, doc: &DocumentRef, record: Value, options: SetOptions) -> Result<(), StoreError>;
}

/// Handle to an uploaded blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobHandle {
    /// Path of the blob inside the store, e.g. `banners/1700000000000_logo.png`
    pub path: String,
}

/// An object store that hands out public URLs for uploaded bytes
pub trait BlobStore: Send + Sync {
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<BlobHandle, StoreError>;

    fn public_url(&self, handle: &BlobHandle) -> Result<String, StoreError>;
}

/// Recursively merge `patch` into `target`
///
/// Objects merge key by key; any other value (arrays included) replaces the
/// target outright.
pub fn merge_value(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge_value(existing, value);
                    }
                    _ => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}
