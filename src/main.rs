use anyhow::Result;
use eframe::egui;
use stream_overlay::gui::OverlayApp;
use stream_overlay::logging;
use stream_overlay::settings::Settings;

const SETTINGS_FILE: &str = "settings.json";

fn main() -> Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging);

    let app = OverlayApp::new(settings);
    let size = app.window_size();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([size.x, size.y])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        "Stream Overlay",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("failed to start overlay window: {err}"))
}
