use eframe::egui;

use super::data::{
    ServerSettings,
    SettingsData,
    POLL_INTERVAL_RANGE,
    REQUEST_TIMEOUT_RANGE,
};

#[derive(Clone, Default)]
pub struct ServerSettingsData {
    pub settings: SettingsData,
    pub temp_server_settings: ServerSettings,
    pub original_settings: SettingsData,
}

impl ServerSettingsData {
    pub fn is_dirty(&self) -> bool {
        self.temp_server_settings != self.original_settings.server
    }
}

pub struct ServerSettingsModal {
    open: bool,
    data: ServerSettingsData,
    validation_error: Option<String>,
}

impl ServerSettingsModal {
    pub fn new() -> Self {
        Self { open: false, data: ServerSettingsData::default(), validation_error: None }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.data.temp_server_settings = current_settings.server.clone();
        self.data.original_settings = current_settings.clone();
        self.data.settings = current_settings;
        self.validation_error = None;
        self.open = true;
    }

    /// Returns the new settings once the user saved a valid configuration.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut result: Option<SettingsData> = None;

        let modal = egui::Modal::new(egui::Id::new("server_settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Server-Einstellungen");
            ui.add_space(10.0);

            self.ui_server_configuration(ui);
            ui.add_space(10.0);

            if let Some(error) = &self.validation_error {
                ui.colored_label(egui::Color32::RED, format!("⚠ {}", error));
                ui.add_space(5.0);
            }

            ui.separator();

            let is_dirty = self.data.is_dirty();

            ui.horizontal(|ui| {
                if is_dirty {
                    ui.colored_label(egui::Color32::YELLOW, "⚠");
                    ui.label("Einstellungen wurden geändert");
                } else {
                    ui.colored_label(egui::Color32::TRANSPARENT, "⚠");
                    ui.label("");
                }
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                let save_clicked =
                    ui.add_enabled(is_dirty, egui::Button::new("Speichern")).clicked();
                let cancel_clicked = ui.button("Abbrechen").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Standard wiederherstellen").clicked();
                });

                if save_clicked {
                    match self.data.temp_server_settings.validate() {
                        Ok(()) => {
                            let mut settings = self.data.settings.clone();
                            settings.server = self.data.temp_server_settings.clone();
                            self.data.original_settings = settings.clone();
                            self.validation_error = None;
                            result = Some(settings);
                            ui.close();
                        }
                        Err(e) => {
                            self.validation_error = Some(e.to_string());
                        }
                    }
                } else if cancel_clicked {
                    self.data.temp_server_settings = self.data.original_settings.server.clone();
                    self.validation_error = None;
                    ui.close();
                } else if reset_clicked {
                    self.data.temp_server_settings = ServerSettings::default();
                    self.validation_error = None;
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }

    fn ui_server_configuration(&mut self, ui: &mut egui::Ui) {
        let settings = &mut self.data.temp_server_settings;

        egui::Grid::new("server_settings_grid").num_columns(2).spacing([10.0, 6.0]).show(
            ui,
            |ui| {
                ui.label("Backend-URL:");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.base_url)
                        .hint_text(super::data::DEFAULT_BASE_URL)
                        .desired_width(260.0),
                );
                ui.end_row();

                ui.label("Abfrageintervall:");
                ui.add(
                    egui::DragValue::new(&mut settings.poll_interval_secs)
                        .speed(1.0)
                        .range(POLL_INTERVAL_RANGE)
                        .suffix(" s"),
                );
                ui.end_row();

                ui.label("Zeitlimit für Abfragen:");
                ui.add(
                    egui::DragValue::new(&mut settings.request_timeout_secs)
                        .speed(1.0)
                        .range(REQUEST_TIMEOUT_RANGE)
                        .suffix(" s"),
                );
                ui.end_row();
            },
        );
    }
}

impl Default for ServerSettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
