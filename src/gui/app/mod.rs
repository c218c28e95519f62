mod modals;

use std::time::Instant;

use eframe::egui;
use modals::Modals;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    jobs_panel::JobsPanel,
    notice_modal::NoticeModal,
    samples_panel::SamplesPanel,
    settings::{
        ServerSettings,
        SettingsData,
        SETTINGS_FILE,
    },
    status_panel::StatusPanel,
    top_bar::TopBar,
    upload_panel::UploadPanel,
};
use crate::{
    core::{
        tasks::Command,
        ClientContext,
        PanelError,
        PanelState,
    },
    persistence::save_json,
};

pub struct PanelApp {
    // Configuration
    pub settings_data: SettingsData,

    // UI State
    pub state: PanelState,
    actions: ActionQueue,

    // Modals
    pub modals: Modals,

    // Backend
    client: ClientContext,
}

impl PanelApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut settings_data: SettingsData,
    ) -> Result<Self, PanelError> {
        let egui_ctx = cc.egui_ctx.clone();
        let waker = move || egui_ctx.request_repaint();

        let client = match ClientContext::new(&settings_data.server.client_config(), waker.clone())
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(
                    "Gespeicherte Server-Einstellungen sind ungültig ({}), verwende Standardwerte",
                    e
                );
                settings_data.server = ServerSettings::default();
                ClientContext::new(&settings_data.server.client_config(), waker)?
            }
        };

        let state = PanelState::new();
        client.dispatch(state.startup());

        Ok(Self {
            settings_data,
            state,
            actions: ActionQueue::new(),
            modals: Modals::default(),
            client,
        })
    }

    fn handle_action(&mut self, action: UiAction, ctx: &egui::Context) {
        let commands = match action {
            UiAction::SelectFile(path) => {
                tracing::debug!("Datei ausgewählt: {}", path.display());
                self.state.selected_file = Some(path);
                Vec::new()
            }
            UiAction::Upload => self.state.request_upload(),
            UiAction::Train => self.state.request_train(),
            UiAction::Synthesize => self.state.request_synthesis(),
            UiAction::SaveOutput(destination) => self.state.request_save_output(destination),
            UiAction::OpenServerSettings => {
                self.modals.server_settings.open_settings(self.settings_data.clone());
                Vec::new()
            }
            UiAction::DismissNotice => {
                self.state.dismiss_notice();
                Vec::new()
            }
            UiAction::Quit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                Vec::new()
            }
        };

        self.client.dispatch(commands);
    }

    fn apply_settings(&mut self, settings: SettingsData) {
        if let Err(e) = self.client.reconfigure(&settings.server.client_config()) {
            tracing::error!("Server-Einstellungen konnten nicht übernommen werden: {}", e);
            return;
        }

        self.settings_data = settings;
        self.save_settings();
        self.client.dispatch([Command::FetchSamples, Command::FetchStatus]);
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            tracing::error!("Failed to save settings: {}", e);
        }
    }

    fn draw_panels(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.columns(2, |columns| {
                    StatusPanel::show(
                        &mut columns[0],
                        &self.state,
                        self.client.api(),
                        &mut self.actions,
                    );

                    UploadPanel::show(&mut columns[1], &self.state, &mut self.actions);
                    columns[1].separator();
                    SamplesPanel::show(&mut columns[1], self.state.samples());
                    columns[1].separator();
                    JobsPanel::show(
                        &mut columns[1],
                        &mut self.state.synthesis_text,
                        &mut self.actions,
                    );
                });
            });
        });
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        for result in self.client.poll_results() {
            let commands = self.state.handle(result, now);
            self.client.dispatch(commands);
        }

        self.state.tick(now);
        let until_poll = self.client.drive_poll(now);

        TopBar::show(
            ctx,
            &mut self.actions,
            self.state.connection(),
            self.client.api().base_url().as_str(),
        );

        self.draw_panels(ctx);

        if let Some(notice) = self.state.current_notice() {
            if NoticeModal::show(ctx, notice) {
                self.actions.push(UiAction::DismissNotice);
            }
        }

        if let Some(settings) = self.modals.server_settings.show(ctx) {
            self.apply_settings(settings);
        }

        let actions: Vec<UiAction> = self.actions.drain().collect();
        for action in actions {
            self.handle_action(action, ctx);
        }

        let next_wake = match self.state.upload().hide_in(now) {
            Some(hide_in) => hide_in.min(until_poll),
            None => until_poll,
        };
        ctx.request_repaint_after(next_wake);
    }
}
