use std::path::Path;

use eframe::egui;
use techcomview::app::TechComViewApp;
use techcomview::config::{DashboardConfig, APP_NAME, CONFIG_FILE};

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &format!("{APP_NAME} – Telecom Dashboard"),
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the png logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(TechComViewApp::new(config)))
        }),
    )
}
