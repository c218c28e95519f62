use std::path::PathBuf;

use eframe::egui;

use super::actions::{
    ActionQueue,
    UiAction,
};
use crate::core::{
    models::UploadPhase,
    PanelState,
};

pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg", "m4a"];

pub struct UploadPanel;

impl UploadPanel {
    pub fn show(ui: &mut egui::Ui, state: &PanelState, actions: &mut ActionQueue) {
        ui.heading("Beispiel hochladen");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui.button("Datei auswählen…").clicked() {
                if let Some(path) = pick_audio_file() {
                    actions.push(UiAction::SelectFile(path));
                }
            }

            match &state.selected_file {
                Some(path) => {
                    let name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    ui.label(name).on_hover_text(path.display().to_string());
                }
                None => {
                    ui.weak("Keine Datei ausgewählt");
                }
            }
        });

        ui.add_space(4.0);
        if ui.button("Hochladen").clicked() {
            actions.push(UiAction::Upload);
        }

        let upload = state.upload();
        if upload.is_visible() {
            ui.add_space(4.0);
            let mut bar = egui::ProgressBar::new(upload.fraction()).text(upload.label());
            if upload.phase == UploadPhase::Error {
                bar = bar.fill(egui::Color32::from_rgb(200, 80, 80));
            }
            ui.add(bar);
        }
    }
}

fn pick_audio_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Beispiel auswählen")
        .add_filter("Audiodateien", AUDIO_EXTENSIONS)
        .add_filter("Alle Dateien", &["*"])
        .pick_file()
}
