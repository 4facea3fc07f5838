use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Century Games");
        ui.label(RichText::new("Video games 2000–2025").weak());
    });
    ui.add_space(4.0);
    ui.separator();

    for page in Page::ALL {
        if ui
            .selectable_label(state.page == page, page.label())
            .clicked()
        {
            state.page = page;
        }
    }
    ui.separator();

    let Some(loaded) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Dataset");
    ui.label(format!("{} games", loaded.table.len()));
    if let Some((first, last)) = loaded.table.year_range() {
        ui.label(format!("Released {first}–{last}"));
    }
    let report = &loaded.report;
    if report.rejected > 0 {
        ui.label(
            RichText::new(format!("{} rows rejected", report.rejected))
                .color(Color32::from_rgb(0xe1, 0x57, 0x59)),
        );
    }
    let malformed = report.malformed_total();
    if malformed > 0 {
        ui.label(format!("{malformed} list cells unreadable"));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export all as CSV…"))
                .clicked()
            {
                let rows: Vec<usize> = state.table().map(|t| (0..t.len()).collect()).unwrap_or_default();
                export_file_dialog(state, "century_games.csv", &rows);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(loaded) = &state.dataset {
            ui.label(format!("{} games loaded", loaded.table.len()));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open games dataset")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState, default_name: &str, rows: &[usize]) {
    let file = rfd::FileDialog::new()
        .set_title("Export games")
        .set_file_name(default_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_with_status(&path, rows);
    }
}
