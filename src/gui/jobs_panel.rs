use eframe::egui;

use super::actions::{
    ActionQueue,
    UiAction,
};

pub struct JobsPanel;

impl JobsPanel {
    pub fn show(ui: &mut egui::Ui, synthesis_text: &mut String, actions: &mut ActionQueue) {
        ui.heading("Training");
        ui.add_space(4.0);
        if ui.button("Training starten").clicked() {
            actions.push(UiAction::Train);
        }

        ui.add_space(12.0);
        ui.heading("Synthese");
        ui.add_space(4.0);
        ui.add(
            egui::TextEdit::multiline(synthesis_text)
                .hint_text("Text für die Synthese eingeben…")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);
        if ui.button("Synthese starten").clicked() {
            actions.push(UiAction::Synthesize);
        }
    }
}
