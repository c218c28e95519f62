use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

pub struct SamplesPanel;

impl SamplesPanel {
    pub fn show(ui: &mut egui::Ui, samples: &[String]) {
        ui.heading(format!("Beispiele ({})", samples.len()));
        ui.add_space(4.0);

        if samples.is_empty() {
            ui.weak("Noch keine Beispiele hochgeladen.");
            return;
        }

        let row_height = egui::TextStyle::Body.resolve(ui.style()).size.max(ui.spacing().interact_size.y);

        TableBuilder::new(ui)
            .id_salt("samples_table")
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(36.0))
            .column(Column::remainder())
            .max_scroll_height(240.0)
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                header.col(|ui| {
                    ui.strong("Datei");
                });
            })
            .body(|body| {
                body.rows(row_height, samples.len(), |mut row| {
                    let index = row.index();
                    row.col(|ui| {
                        ui.weak((index + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(&samples[index]);
                    });
                });
            });
    }
}
