//! Banner Editor - desktop editor for the site banner configuration
//!
//! Edits a single banner document (texts, phone numbers, gradient and image
//! gallery) kept in a document store, with images uploaded to a blob store.

mod app;
mod core;
mod ui;

use app::BannerEditorApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Banner Editor...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 720.0])
            .with_min_inner_size([480.0, 400.0])
            .with_title("Banner Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Banner Editor",
        native_options,
        Box::new(|cc| Ok(Box::new(BannerEditorApp::new(cc)?))),
    )
}
