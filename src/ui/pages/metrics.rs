use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::aggregate::{self, Kpis};
use crate::data::quality::{self, QualityChecks};
use crate::state::AppState;

use super::{no_dataset, text_table};

pub fn show(ui: &mut Ui, state: &AppState) {
    let Some(loaded) = &state.dataset else {
        no_dataset(ui);
        return;
    };
    let quality = quality::check(loaded);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Key figures");
            kpi_grid(ui, &aggregate::kpis(&loaded.table.games));
            ui.separator();

            ui.heading("Data quality");
            quality_summary(ui, &quality);
            ui.add_space(6.0);

            ui.strong("Missing values per column");
            let rows: Vec<Vec<String>> = quality
                .missing
                .iter()
                .map(|m| {
                    vec![
                        m.column.to_string(),
                        m.count.to_string(),
                        format!("{:.2}%", m.percent),
                    ]
                })
                .collect();
            text_table(ui, "missing_values", &["Column", "Missing", "Share"], &rows);

            let examples = &loaded.report.rejected_examples;
            if !examples.is_empty() {
                ui.add_space(6.0);
                egui::CollapsingHeader::new("Rejected rows")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        for err in examples {
                            ui.label(err.to_string());
                        }
                    });
            }
        });
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "–".to_string(), |v| v.to_string())
}

fn kpi_grid(ui: &mut Ui, kpis: &Kpis) {
    let tiles = [
        ("Total games", kpis.total.to_string()),
        ("With reliable votes", kpis.reliable.to_string()),
        ("Average rating", or_dash(kpis.average_rating)),
        ("Average reliable rating", or_dash(kpis.average_reliable_rating)),
        ("First release", or_dash(kpis.first_year)),
        ("Last release", or_dash(kpis.last_year)),
    ];
    egui::Grid::new("kpis")
        .num_columns(3)
        .spacing([40.0, 12.0])
        .show(ui, |ui: &mut Ui| {
            for (i, (label, value)) in tiles.iter().enumerate() {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(RichText::new(*label).weak());
                    ui.label(RichText::new(value).size(24.0).strong());
                });
                if i % 3 == 2 {
                    ui.end_row();
                }
            }
        });
}

fn quality_summary(ui: &mut Ui, quality: &QualityChecks) {
    let lines = [
        ("Duplicate rows", quality.duplicate_rows),
        ("Ratings outside [0, 100]", quality.invalid_ratings),
        ("Unknown age ratings", quality.invalid_age_ratings),
        ("Unreadable list cells", quality.malformed_lists),
        ("Company/country length mismatches", quality.misaligned_companies),
        ("Platform/family length mismatches", quality.platform_mismatches),
        ("Rejected rows", quality.rejected_rows),
    ];
    egui::Grid::new("quality")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for (label, count) in lines {
                ui.label(label);
                let text = RichText::new(count.to_string());
                ui.label(if count == 0 {
                    text.color(crate::color::POSITIVE)
                } else {
                    text.color(crate::color::NEGATIVE)
                });
                ui.end_row();
            }
        });
}
