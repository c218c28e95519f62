use eframe::egui;

use crate::core::models::{
    Notice,
    NoticeKind,
};

/// Blocking dialog for the notice at the front of the queue.
pub struct NoticeModal;

impl NoticeModal {
    /// Returns true once the user acknowledged the notice.
    pub fn show(ctx: &egui::Context, notice: &Notice) -> bool {
        let (icon, color) = match notice.kind {
            NoticeKind::Hint => ("ℹ", egui::Color32::LIGHT_BLUE),
            NoticeKind::Error => ("⚠", egui::Color32::RED),
        };

        let modal = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
            ui.set_width(420.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icon).size(24.0).color(color));
                ui.label(egui::RichText::new(&notice.title).size(18.0).strong());
            });

            ui.add_space(10.0);

            ui.label(egui::RichText::new(&notice.message).size(14.0));

            ui.add_space(15.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        ui.close();
                    }
                });
            });
        });

        modal.should_close()
    }
}
