//! Banner form panel

use eframe::egui;

use super::gallery::GalleryPanel;
use crate::core::editor::EditorState;

/// What the user asked for while the form was shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormAction {
    #[default]
    None,
    /// Pick an image file and upload it
    Upload,
    /// Persist the current record
    Save,
}

/// The banner editing form
pub struct BannerForm;

impl BannerForm {
    /// Show the form, or the loading placeholder until the document arrives
    pub fn show(ui: &mut egui::Ui, editor: &mut EditorState) -> FormAction {
        if editor.is_loading() {
            ui.label("Загрузка…");
            return FormAction::None;
        }

        let mut action = FormAction::None;

        ui.heading("Баннер");
        ui.add_space(8.0);

        let mut enabled = editor.config().enabled;
        if ui.checkbox(&mut enabled, "Включён").changed() {
            editor.edit(|c| c.with_enabled(enabled));
        }

        ui.add_space(12.0);
        ui.spacing_mut().item_spacing.y = 8.0;

        if let Some(title) = Self::text_field(ui, &editor.config().title, "Заголовок") {
            editor.edit(|c| c.with_title(title));
        }
        if let Some(subtitle) = Self::text_field(ui, &editor.config().subtitle, "Подзаголовок") {
            editor.edit(|c| c.with_subtitle(subtitle));
        }
        if let Some(phone) = Self::text_field(ui, &editor.config().phone_display, "Phone display") {
            editor.edit(|c| c.with_phone_display(phone));
        }
        if let Some(phone) = Self::text_field(ui, &editor.config().phone_raw, "Phone raw") {
            editor.edit(|c| c.with_phone_raw(phone));
        }
        if let Some(text) = Self::text_field(
            ui,
            &editor.config().gradient_text(),
            "Градиент через запятую, напр. \"#FF6A6F,#E33B3B,#B10E1E\"",
        ) {
            editor.edit(|c| c.with_gradient_text(&text));
        }

        ui.add_space(12.0);
        if ui
            .button("Выбрать изображение…")
            .on_hover_text("Загрузить изображение в галерею")
            .clicked()
        {
            action = FormAction::Upload;
        }
        GalleryPanel::show(ui, &editor.config().images);

        ui.add_space(12.0);
        if ui.button("Сохранить").clicked() {
            action = FormAction::Save;
        }

        action
    }

    /// Single-line input bound to `value`; returns the new text when edited
    fn text_field(ui: &mut egui::Ui, value: &str, hint: &str) -> Option<String> {
        let mut text = value.to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        );
        response.changed().then_some(text)
    }
}

