//! Acknowledgment shown after a successful save

use eframe::egui;

use crate::core::editor::EditorState;

/// Modal "saved" notice
pub struct SavedDialog;

impl SavedDialog {
    /// Show the notice while the editor asks for it; blocks the form until dismissed
    pub fn show(ctx: &egui::Context, editor: &mut EditorState) {
        if !editor.saved_notice() {
            return;
        }

        let response = egui::Modal::new(egui::Id::new("saved_notice")).show(ctx, |ui| {
            ui.set_min_width(200.0);
            ui.vertical_centered(|ui| {
                ui.label("Сохранено");
                ui.add_space(8.0);
                ui.button("OK").clicked()
            })
            .inner
        });

        if response.inner || response.should_close() {
            editor.dismiss_saved_notice();
        }
    }
}
