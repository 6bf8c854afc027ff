//! Banner configuration record and its copy-on-edit operations

use serde::{Deserialize, Serialize};

/// An image shown in the banner gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerImage {
    /// Public URL of the uploaded image
    pub url: String,
    /// Optional alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl BannerImage {
    /// Create an image entry without alt text
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: None,
        }
    }
}

/// The banner configuration document
///
/// Every editing operation consumes the current record and returns a new one
/// with a single field substituted. Fields missing from a stored document
/// fall back to the built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Whether the banner is shown on the site
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
    /// Phone number as displayed to visitors
    pub phone_display: String,
    /// Phone number as dialed
    pub phone_raw: String,
    /// Gradient color stops, in order
    #[serde(rename = "bgGradient")]
    pub bg_gradient: Vec<String>,
    pub images: Vec<BannerImage>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Возникли вопросы?".to_string(),
            subtitle: "Мы поможем вам!".to_string(),
            phone_display: "418 001 010".to_string(),
            phone_raw: "418001010".to_string(),
            bg_gradient: vec![
                "#FF6A6F".to_string(),
                "#E33B3B".to_string(),
                "#B10E1E".to_string(),
            ],
            images: Vec::new(),
        }
    }
}

impl BannerConfig {
    pub fn with_enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }

    pub fn with_title(self, title: String) -> Self {
        Self { title, ..self }
    }

    pub fn with_subtitle(self, subtitle: String) -> Self {
        Self { subtitle, ..self }
    }

    pub fn with_phone_display(self, phone_display: String) -> Self {
        Self {
            phone_display,
            ..self
        }
    }

    pub fn with_phone_raw(self, phone_raw: String) -> Self {
        Self { phone_raw, ..self }
    }

    /// Replace the gradient with the stops parsed from comma-joined text
    pub fn with_gradient_text(self, text: &str) -> Self {
        Self {
            bg_gradient: parse_gradient(text),
            ..self
        }
    }

    /// Append an image to the end of the gallery
    pub fn with_image_appended(self, image: BannerImage) -> Self {
        let mut images = self.images;
        images.push(image);
        Self { images, ..self }
    }

    /// Gradient stops joined the way the form displays them
    pub fn gradient_text(&self) -> String {
        self.bg_gradient.join(",")
    }
}

/// Split comma-joined gradient text into trimmed stops
///
/// Empty segments are kept, so an empty string yields one empty stop.
pub fn parse_gradient(text: &str) -> Vec<String> {
    text.split(',').map(|s| s.trim().to_string()).collect()
}
