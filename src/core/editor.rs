//! In-memory editing state for the banner form

use super::banner::{BannerConfig, BannerImage};

/// Completion of a background store operation
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The banner document was fetched (or defaulted)
    Loaded(BannerConfig),
    /// The current record was written to the store
    Saved,
    /// An image was uploaded and has a public URL
    ImageUploaded(BannerImage),
}

/// Editor state: the record being edited plus view flags
#[derive(Debug, Clone)]
pub struct EditorState {
    config: BannerConfig,
    loading: bool,
    saved_notice: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Start in the loading state, holding the default record
    pub fn new() -> Self {
        Self {
            config: BannerConfig::default(),
            loading: true,
            saved_notice: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The record as currently edited
    pub fn config(&self) -> &BannerConfig {
        &self.config
    }

    /// Replace the record with the result of `edit`
    pub fn edit(&mut self, edit: impl FnOnce(BannerConfig) -> BannerConfig) {
        let current = std::mem::take(&mut self.config);
        self.config = edit(current);
    }

    /// Whether the save acknowledgment should be shown
    pub fn saved_notice(&self) -> bool {
        self.saved_notice
    }

    pub fn dismiss_saved_notice(&mut self) {
        self.saved_notice = false;
    }

    /// Fold a finished background operation into the state
    pub fn apply(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Loaded(config) => {
                self.config = config;
                self.loading = false;
            }
            TaskOutcome::Saved => self.saved_notice = true,
            TaskOutcome::ImageUploaded(image) => {
                self.edit(|config| config.with_image_appended(image));
            }
        }
    }
}
