use crate::gui::settings::ServerSettingsModal;

pub struct Modals {
    pub server_settings: ServerSettingsModal,
}

impl Default for Modals {
    fn default() -> Self {
        Self { server_settings: ServerSettingsModal::new() }
    }
}
