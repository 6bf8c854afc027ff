//! Application configuration management

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::store::DocumentRef;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage locations
    pub store: StoreConfig,
    /// Which document holds the banner
    pub document: DocumentConfig,
    /// UI settings
    pub ui: UiConfig,
}

/// Storage settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root of the document store (defaults to `<data dir>/documents`)
    pub data_dir: Option<PathBuf>,
    /// Root of the blob store (defaults to `<data dir>/blobs`)
    pub blob_dir: Option<PathBuf>,
    /// Prefix for public blob URLs; blobs get `file://` URLs without one
    pub public_base_url: Option<String>,
}

/// Banner document location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub collection: String,
    pub id: String,
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    /// Maximum width of the form column
    pub form_width: f32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            collection: "config".to_string(),
            id: "banner-default".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            form_width: 720.0,
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "banner-editor", "BannerEditor")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Get the document store root
    pub fn documents_dir(&self) -> PathBuf {
        self.store
            .data_dir
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join("documents"))
    }

    /// Get the blob store root
    pub fn blobs_dir(&self) -> PathBuf {
        self.store
            .blob_dir
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join("blobs"))
    }

    /// Reference to the banner document
    pub fn banner_document(&self) -> DocumentRef {
        DocumentRef::new(&self.document.collection, &self.document.id)
    }

    fn default_data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("banner-data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_ref() {
        let config = AppConfig::default();
        assert_eq!(
            config.banner_document(),
            DocumentRef::new("config", "banner-default")
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"store": {"public_base_url": "https://cdn"}}"#).unwrap();
        assert_eq!(config.store.public_base_url.as_deref(), Some("https://cdn"));
        assert_eq!(config.document, DocumentConfig::default());
        assert_eq!(config.ui.form_width, 720.0);
    }

    #[test]
    fn test_explicit_store_dirs_win() {
        let mut config = AppConfig::default();
        config.store.data_dir = Some(PathBuf::from("/srv/docs"));
        config.store.blob_dir = Some(PathBuf::from("/srv/blobs"));
        assert_eq!(config.documents_dir(), PathBuf::from("/srv/docs"));
        assert_eq!(config.blobs_dir(), PathBuf::from("/srv/blobs"));
    }

    #[test]
    fn test_default_dirs_are_distinct() {
        let config = AppConfig::default();
        assert_ne!(config.documents_dir(), config.blobs_dir());
    }
}
