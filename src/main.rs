mod app;
mod color;
mod config;
mod data;
mod geo;
mod state;
mod ui;

use app::CenturyGamesApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring config: {e:#}");
            AppConfig::default()
        }
    }
    .with_args(std::env::args().skip(1));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Century Games – Video Games Explorer",
        options,
        Box::new(|cc| {
            // Covers are fetched over http and decoded by the image loaders.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(CenturyGamesApp::new(config)))
        }),
    )
}
