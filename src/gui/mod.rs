pub mod actions;
pub mod app;
pub mod jobs_panel;
pub mod notice_modal;
pub mod samples_panel;
pub mod settings;
pub mod status_panel;
pub mod top_bar;
pub mod upload_panel;

pub use app::PanelApp;
