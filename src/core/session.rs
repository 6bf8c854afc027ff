//! Load, save and upload operations for the banner document

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use super::banner::{BannerConfig, BannerImage};
use super::store::{BlobStore, DocumentRef, DocumentStore, SetOptions};

/// Directory inside the blob store that holds banner images
pub const BANNER_BLOB_DIR: &str = "banners";

/// Fetch the banner document, falling back to the default when absent
pub fn load_banner(store: &dyn DocumentStore, doc: &DocumentRef) -> Result<BannerConfig> {
    let stored = store
        .get(doc)
        .with_context(|| format!("Failed to fetch document {}", doc))?;

    let config = stored
        .map(serde_json::from_value::<BannerConfig>)
        .transpose()
        .with_context(|| format!("Document {} does not hold a banner config", doc))?;

    Ok(config.unwrap_or_default())
}

/// Write the whole record into the banner document, merging with what is stored
pub fn save_banner(store: &dyn DocumentStore, doc: &DocumentRef, config: &BannerConfig) -> Result<()> {
    let record = serde_json::to_value(config).context("Failed to encode banner config")?;
    store
        .set(doc, record, SetOptions::merge())
        .with_context(|| format!("Failed to save document {}", doc))
}

/// Blob path for an uploaded file: `banners/<unix_millis>_<file name>`
pub fn upload_path(unix_millis: u128, file_name: &str) -> String {
    format!("{}/{}_{}", BANNER_BLOB_DIR, unix_millis, file_name)
}

/// Milliseconds since the Unix epoch
pub fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Upload image bytes and return the gallery entry pointing at them
pub fn upload_image(
    blobs: &dyn BlobStore,
    unix_millis: u128,
    file_name: &str,
    bytes: &[u8],
) -> Result<BannerImage> {
    let path = upload_path(unix_millis, file_name);
    let handle = blobs
        .upload(&path, bytes)
        .with_context(|| format!("Failed to upload {}", path))?;
    let url = blobs
        .public_url(&handle)
        .with_context(|| format!("Failed to resolve public URL of {}", path))?;
    Ok(BannerImage::new(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{FsBlobStore, FsDocumentStore};
    use serde_json::json;
    use tempfile::TempDir;

    fn banner_ref() -> DocumentRef {
        DocumentRef::new("config", "banner-default")
    }

    #[test]
    fn test_load_absent_yields_default() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());
        assert_eq!(load_banner(&store, &banner_ref()).unwrap(), BannerConfig::default());
    }

    #[test]
    fn test_load_existing_yields_stored_fields() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());
        store
            .set(
                &banner_ref(),
                json!({
                    "enabled": false,
                    "title": "Скидки",
                    "subtitle": "Только сегодня",
                    "phone_display": "8 800 000 00 00",
                    "phone_raw": "88000000000",
                    "bgGradient": ["#000000", "#FFFFFF"],
                    "images": [{"url": "https://cdn/a.png", "alt": "a"}]
                }),
                SetOptions::default(),
            )
            .unwrap();

        let cfg = load_banner(&store, &banner_ref()).unwrap();
        assert!(!cfg.enabled);
        assert_eq!(cfg.title, "Скидки");
        assert_eq!(cfg.subtitle, "Только сегодня");
        assert_eq!(cfg.phone_display, "8 800 000 00 00");
        assert_eq!(cfg.phone_raw, "88000000000");
        assert_eq!(cfg.bg_gradient, vec!["#000000", "#FFFFFF"]);
        assert_eq!(cfg.images[0].alt.as_deref(), Some("a"));
    }

    #[test]
    fn test_load_wrong_shape_fails() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());
        store
            .set(&banner_ref(), json!({"enabled": "yes"}), SetOptions::default())
            .unwrap();
        assert!(load_banner(&store, &banner_ref()).is_err());
    }

    #[test]
    fn test_load_numeric_phone_names_document() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());
        store
            .set(&banner_ref(), json!({"phone_raw": 418001010}), SetOptions::default())
            .unwrap();

        let err = load_banner(&store, &banner_ref()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("config/banner-default does not hold a banner config"));
        assert!(message.contains("invalid type"));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());
        let cfg = BannerConfig::default()
            .with_title("Новый заголовок".to_string())
            .with_gradient_text("#111, #222")
            .with_image_appended(BannerImage::new("https://cdn/x.png"));

        save_banner(&store, &banner_ref(), &cfg).unwrap();
        assert_eq!(load_banner(&store, &banner_ref()).unwrap(), cfg);
    }

    #[test]
    fn test_save_merges_with_remote_fields() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());
        store
            .set(&banner_ref(), json!({"schedule": "weekdays"}), SetOptions::default())
            .unwrap();

        save_banner(&store, &banner_ref(), &BannerConfig::default()).unwrap();

        let stored = store.get(&banner_ref()).unwrap().unwrap();
        assert_eq!(stored["schedule"], "weekdays");
        assert_eq!(stored["title"], "Возникли вопросы?");
    }

    #[test]
    fn test_upload_path_format() {
        assert_eq!(
            upload_path(1_700_000_000_123, "logo.png"),
            "banners/1700000000123_logo.png"
        );
    }

    #[test]
    fn test_upload_image_returns_public_url() {
        let dir = TempDir::new().unwrap();
        let blobs = FsBlobStore::new(dir.path(), Some("https://cdn.example.com".to_string()));

        let image = upload_image(&blobs, 42, "photo.jpg", b"jpeg").unwrap();
        assert_eq!(image.url, "https://cdn.example.com/banners/42_photo.jpg");
        assert_eq!(image.alt, None);
        assert!(dir.path().join("banners").join("42_photo.jpg").exists());
    }
}
