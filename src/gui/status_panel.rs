use eframe::egui;

use super::actions::{
    ActionQueue,
    UiAction,
};
use crate::{
    backend::PanelApi,
    core::{
        models::{
            JobDisplay,
            OutputView,
        },
        PanelState,
    },
};

pub struct StatusPanel;

impl StatusPanel {
    pub fn show(ui: &mut egui::Ui, state: &PanelState, api: &PanelApi, actions: &mut ActionQueue) {
        ui.heading("Status");
        ui.add_space(4.0);

        egui::Grid::new("job_status_grid").num_columns(2).spacing([12.0, 4.0]).show(ui, |ui| {
            ui.label("Training:");
            job_label(ui, state.training_display());
            ui.end_row();

            ui.label("Synthese:");
            job_label(ui, state.synthesis_display());
            ui.end_row();
        });

        ui.add_space(6.0);
        let status = state.status();
        ui.add(
            egui::ProgressBar::new(status.progress_fraction())
                .text(format!("{}%", status.progress_percent())),
        );

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Ausgabedatei:");
            match state.output_view(api) {
                OutputView::Link { file_name, url } => {
                    ui.hyperlink_to(file_name.as_str(), url.as_str());
                    if ui.small_button("Speichern unter…").clicked() {
                        if let Some(path) =
                            rfd::FileDialog::new().set_file_name(&file_name).save_file()
                        {
                            actions.push(UiAction::SaveOutput(path));
                        }
                    }
                }
                view @ OutputView::None => {
                    ui.weak(view.label());
                }
            }
        });

        if let Some(message) = state.last_message() {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(message).italics());
        }

        ui.add_space(6.0);
        ui.label(egui::RichText::new("Protokoll").strong());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("status_log")
                .max_height(200.0)
                .auto_shrink([false, true])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in state.log_entries() {
                        ui.monospace(line);
                    }
                });
        });

        if let Some(updated) = state.last_updated() {
            ui.small(format!("Zuletzt aktualisiert: {}", updated.format("%H:%M:%S")));
        }
    }
}

fn job_label(ui: &mut egui::Ui, display: JobDisplay) {
    let color = match display {
        JobDisplay::Running => egui::Color32::from_rgb(0, 200, 0),
        JobDisplay::Starting => egui::Color32::from_rgb(230, 180, 40),
        JobDisplay::Idle => ui.visuals().weak_text_color(),
    };
    ui.label(egui::RichText::new(display.label()).color(color));
}
