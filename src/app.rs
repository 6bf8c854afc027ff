//! Main application state and UI coordination

use std::sync::Arc;

use anyhow::Result;
use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::editor::EditorState;
use crate::core::store::{FsBlobStore, FsDocumentStore};
use crate::core::tasks::TaskRunner;
use crate::ui::{
    form::{BannerForm, FormAction},
    saved_dialog::SavedDialog,
};

/// Extensions offered by the image picker
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

/// Main application state
pub struct BannerEditorApp {
    /// Application configuration
    config: AppConfig,
    /// Record being edited and view flags
    editor: EditorState,
    /// Background store operations
    tasks: TaskRunner,
}

impl BannerEditorApp {
    /// Create the application and start loading the banner document
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        // Load config or use defaults
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        });
        Self::apply_theme(&cc.egui_ctx, &config.ui.theme);

        let documents = Arc::new(FsDocumentStore::new(config.documents_dir()));
        let blobs = Arc::new(FsBlobStore::new(
            config.blobs_dir(),
            config.store.public_base_url.clone(),
        ));
        let repaint = cc.egui_ctx.clone();
        let tasks = TaskRunner::new(
            documents,
            blobs,
            config.banner_document(),
            Arc::new(move || repaint.request_repaint()),
        )?;

        tracing::info!("Loading banner document {}", config.banner_document());
        tasks.spawn_load();

        Ok(Self::from_parts(config, tasks))
    }

    fn from_parts(config: AppConfig, tasks: TaskRunner) -> Self {
        Self {
            config,
            editor: EditorState::new(),
            tasks,
        }
    }

    fn apply_theme(ctx: &egui::Context, theme: &str) {
        let visuals = if theme == "light" {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        ctx.set_visuals(visuals);
    }

    /// Switch between the dark and light theme and remember the choice
    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.config.ui.theme = if self.config.ui.theme == "light" {
            "dark".to_string()
        } else {
            "light".to_string()
        };
        Self::apply_theme(ctx, &self.config.ui.theme);
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {:#}", e);
        }
    }

    /// Save a snapshot of the current record
    fn request_save(&self) {
        if self.editor.is_loading() {
            return;
        }
        self.tasks.spawn_save(self.editor.config().clone());
    }

    /// Ask for an image file and upload it
    fn pick_and_upload(&self) {
        if self.editor.is_loading() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Изображения", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.tasks.spawn_upload(path);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let ready = !self.editor.is_loading();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Файл", |ui| {
                    if ui
                        .add_enabled(ready, egui::Button::new("Загрузить изображение…"))
                        .clicked()
                    {
                        self.pick_and_upload();
                        ui.close();
                    }
                    if ui.add_enabled(ready, egui::Button::new("Сохранить")).clicked() {
                        self.request_save();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Выход").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Вид", |ui| {
                    let dark = self.config.ui.theme != "light";
                    if ui.selectable_label(dark, "Тёмная тема").clicked() {
                        self.toggle_theme(ctx);
                        ui.close();
                    }
                });
            });
        });
    }
}

impl eframe::App for BannerEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for outcome in self.tasks.poll() {
            self.editor.apply(outcome);
        }

        // Handle keyboard shortcuts
        let notice_open = self.editor.saved_notice();
        if ctx.input(|i| is_save_shortcut(&i.events, notice_open)) {
            self.request_save();
        }

        self.render_menu_bar(ctx);

        let form_width = self.config.ui.form_width;
        let mut action = FormAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("form_scroll")
                .show(ui, |ui| {
                    let margin = ((ui.available_width() - form_width) / 2.0).max(0.0);
                    ui.horizontal(|ui| {
                        ui.add_space(margin);
                        ui.vertical(|ui| {
                            ui.set_max_width(form_width);
                            ui.add_space(20.0);
                            action = BannerForm::show(ui, &mut self.editor);
                        });
                    });
                });
        });

        match action {
            FormAction::None => {}
            FormAction::Upload => self.pick_and_upload(),
            FormAction::Save => self.request_save(),
        }

        SavedDialog::show(ctx, &mut self.editor);
    }
}

/// Ctrl/Cmd+S pressed this frame, ignoring key repeat and the open save notice
fn is_save_shortcut(events: &[egui::Event], notice_open: bool) -> bool {
    !notice_open
        && events.iter().any(|event| {
            matches!(
                event,
                egui::Event::Key {
                    key: egui::Key::S,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } if modifiers.command
            )
        })
}
