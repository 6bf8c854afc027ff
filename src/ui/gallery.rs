//! Thumbnail strip for the banner images

use eframe::egui;

use crate::core::banner::BannerImage;

/// Edge length of a thumbnail in points
const THUMBNAIL_SIZE: f32 = 96.0;

/// Gallery of uploaded images
pub struct GalleryPanel;

impl GalleryPanel {
    /// Show every image as a fixed-size rounded thumbnail, wrapping rows
    pub fn show(ui: &mut egui::Ui, images: &[BannerImage]) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(8.0, 8.0);

            for image in images {
                let alt = image.alt.as_deref().unwrap_or("");
                let response = ui.add(
                    egui::Image::new(image.url.as_str())
                        .fit_to_exact_size(egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE))
                        .maintain_aspect_ratio(false)
                        .corner_radius(egui::CornerRadius::same(8)),
                );
                if !alt.is_empty() {
                    response.on_hover_text(alt);
                }
            }
        });
    }
}
