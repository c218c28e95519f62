use eframe::egui;
use sovits_panel::{
    gui::{
        settings::{
            SettingsData,
            SETTINGS_FILE,
        },
        PanelApp,
    },
    logging,
    persistence::load_json_or_default,
};

fn main() -> eframe::Result<()> {
    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let settings_data = load_json_or_default::<SettingsData>(SETTINGS_FILE);
    tracing::info!("Starting sovits-panel {}", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SoVITS Panel")
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "sovits-panel",
        options,
        Box::new(|cc| Ok(Box::new(PanelApp::new(cc, settings_data)?))),
    )
}
