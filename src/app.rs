use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, Page};
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CenturyGamesApp {
    pub state: AppState,
}

impl CenturyGamesApp {
    /// Build the app, opening the configured dataset if there is one.
    pub fn new(config: AppConfig) -> Self {
        let data_path = config.data_path.clone();
        let mut state = AppState::new(config);
        if let Some(path) = data_path {
            state.load_path(&path);
        }
        Self { state }
    }
}

impl eframe::App for CenturyGamesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => pages::home::show(ui, &mut self.state),
            Page::Metrics => pages::metrics::show(ui, &self.state),
            Page::Ratings => pages::ratings::show(ui, &mut self.state),
            Page::Releases => pages::releases::show(ui, &mut self.state),
            Page::Companies => pages::companies::show(ui, &mut self.state),
        });
    }
}
