//! Filesystem-backed document store

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tempfile::NamedTempFile;

use super::{merge_value, DocumentRef, DocumentStore, SetOptions, StoreError};

/// Stores each document as `<root>/<collection>/<id>.json`
///
/// Writes are serialized so a merge always reads the latest stored version.
#[derive(Debug)]
pub struct FsDocumentStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the file backing a document
    pub fn document_path(&self, doc: &DocumentRef) -> PathBuf {
        self.root
            .join(&doc.collection)
            .join(format!("{}.json", doc.id))
    }

    fn read(path: &Path) -> Result<Option<Value>, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write(path: &Path, value: &Value) -> Result<(), StoreError> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

        let content = serde_json::to_string_pretty(value)?;
        // Each write gets its own temp file next to the target
        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| StoreError::io(path, e.error))?;
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn get(&self, doc: &DocumentRef) -> Result<Option<Value>, StoreError> {
        let path = self.document_path(doc);
        let value = Self::read(&path)?;
        tracing::info!(
            "Fetched document {} ({})",
            doc,
            if value.is_some() { "found" } else { "absent" }
        );
        Ok(value)
    }

    fn set(&self, doc: &DocumentRef, record: Value, options: SetOptions) -> Result<(), StoreError> {
        if !record.is_object() {
            return Err(StoreError::NotAnObject(doc.clone()));
        }

        let path = self.document_path(doc);
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let value = match Self::read(&path)? {
            Some(mut existing) if options.merge && existing.is_object() => {
                merge_value(&mut existing, record);
                existing
            }
            _ => record,
        };

        Self::write(&path, &value)?;
        tracing::info!("Saved document {} to: {}", doc, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, FsDocumentStore) {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());
        (dir, store)
    }

    fn banner_ref() -> DocumentRef {
        DocumentRef::new("config", "banner-default")
    }

    #[test]
    fn test_get_absent_document() {
        let (_dir, store) = store();
        assert_eq!(store.get(&banner_ref()).unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let (_dir, store) = store();
        let record = json!({"title": "Привет", "images": []});
        store
            .set(&banner_ref(), record.clone(), SetOptions::default())
            .unwrap();

        assert_eq!(store.get(&banner_ref()).unwrap(), Some(record));
        assert!(store.document_path(&banner_ref()).ends_with("config/banner-default.json"));
    }

    #[test]
    fn test_merge_keeps_remote_only_fields() {
        let (_dir, store) = store();
        store
            .set(
                &banner_ref(),
                json!({"title": "old", "updatedBy": "ops"}),
                SetOptions::default(),
            )
            .unwrap();
        store
            .set(&banner_ref(), json!({"title": "new"}), SetOptions::merge())
            .unwrap();

        assert_eq!(
            store.get(&banner_ref()).unwrap(),
            Some(json!({"title": "new", "updatedBy": "ops"}))
        );
    }

    #[test]
    fn test_overwrite_drops_remote_only_fields() {
        let (_dir, store) = store();
        store
            .set(&banner_ref(), json!({"title": "old", "updatedBy": "ops"}), SetOptions::default())
            .unwrap();
        store
            .set(&banner_ref(), json!({"title": "new"}), SetOptions::default())
            .unwrap();

        assert_eq!(store.get(&banner_ref()).unwrap(), Some(json!({"title": "new"})));
    }

    #[test]
    fn test_merge_into_absent_document_creates_it() {
        let (_dir, store) = store();
        store
            .set(&banner_ref(), json!({"enabled": false}), SetOptions::merge())
            .unwrap();
        assert_eq!(store.get(&banner_ref()).unwrap(), Some(json!({"enabled": false})));
    }

    #[test]
    fn test_rejects_non_object_record() {
        let (_dir, store) = store();
        let err = store
            .set(&banner_ref(), json!(["not", "a", "document"]), SetOptions::merge())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject(_)));
    }

    #[test]
    fn test_concurrent_merges_all_succeed() {
        let (_dir, store) = store();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|writer| {
                    let store = &store;
                    scope.spawn(move || {
                        (0..50)
                            .filter(|round| {
                                store
                                    .set(
                                        &banner_ref(),
                                        json!({ format!("writer{}", writer): round }),
                                        SetOptions::merge(),
                                    )
                                    .is_err()
                            })
                            .count()
                    })
                })
                .collect();

            let failed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
            assert_eq!(failed, 0);
        });

        let stored = store.get(&banner_ref()).unwrap().unwrap();
        for writer in 0..4 {
            assert_eq!(stored[format!("writer{}", writer)], 49);
        }
        let leftovers = fs::read_dir(store.document_path(&banner_ref()).parent().unwrap())
            .unwrap()
            .count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_malformed_file_is_decode_error() {
        let (_dir, store) = store();
        let path = store.document_path(&banner_ref());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = store.get(&banner_ref()).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
