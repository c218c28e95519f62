use eframe::egui::{
    self,
    containers,
};

use super::actions::{
    ActionQueue,
    UiAction,
};
use crate::core::models::ConnectionState;

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        actions: &mut ActionQueue,
        connection: ConnectionState,
        backend: &str,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("Datei", |ui| {
                    if ui.button("Beenden").clicked() {
                        actions.push(UiAction::Quit);
                    }
                });

                ui.menu_button("Einstellungen", |ui| {
                    if ui.button("Server…").clicked() {
                        actions.push(UiAction::OpenServerSettings);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_connection_indicator(ui, connection, backend);
                });
            });
        });
    }

    fn show_connection_indicator(ui: &mut egui::Ui, connection: ConnectionState, backend: &str) {
        let (color, tooltip) = match connection {
            ConnectionState::Online => {
                (egui::Color32::from_rgb(0, 200, 0), format!("Verbunden mit {}", backend))
            }
            ConnectionState::Offline => {
                (egui::Color32::from_rgb(200, 80, 80), format!("Keine Verbindung zu {}", backend))
            }
            ConnectionState::Unknown => (egui::Color32::GRAY, format!("Verbinde mit {}…", backend)),
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Backend").on_hover_text(tooltip.as_str());
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip.as_str());
        });
    }
}
