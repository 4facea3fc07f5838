use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::GameView;
use crate::data::model::Game;

pub mod companies;
pub mod home;
pub mod metrics;
pub mod ratings;
pub mod releases;

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Rounded coloured label.
pub fn badge(ui: &mut Ui, text: impl Into<String>, fill: Color32) {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(text.into()).strong().color(Color32::BLACK));
        });
}

pub fn yes_no_badge(ui: &mut Ui, question: &str, yes: bool) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(question);
        let (text, fill) = if yes {
            ("Y", crate::color::YES)
        } else {
            ("N", crate::color::NO)
        };
        badge(ui, text, fill);
    });
}

/// Simple read-only table of preformatted cells.
pub fn text_table(ui: &mut Ui, id: &str, headers: &[&str], rows: &[Vec<String>]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(TABLE_HEIGHT)
            .columns(Column::auto().at_least(60.0), headers.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

fn joined(items: &[String]) -> String {
    items.join(", ")
}

/// Scrollable table of games; only visible rows are laid out.
pub fn games_table(ui: &mut Ui, id: &str, view: &GameView<'_>) {
    const HEADERS: [&str; 9] = [
        "Name",
        "Release date",
        "Rating",
        "Reliable",
        "Developers",
        "Publishers",
        "Platforms",
        "Genres",
        "Game type",
    ];
    let games: Vec<&Game> = view.games().collect();

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(TABLE_HEIGHT)
            .column(Column::initial(220.0).clip(true))
            .columns(Column::auto(), 3)
            .columns(Column::initial(180.0).clip(true), 4)
            .column(Column::remainder())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, games.len(), |mut row| {
                    let g = games[row.index()];
                    let developers: Vec<String> = g.developers.iter().map(|c| c.name.clone()).collect();
                    let publishers: Vec<String> = g.publishers.iter().map(|c| c.name.clone()).collect();
                    let cells = [
                        g.name.clone(),
                        g.first_release_date.to_string(),
                        format!("{:.1}", g.total_rating),
                        if g.has_reliable_votes { "yes" } else { "no" }.to_string(),
                        joined(&developers),
                        joined(&publishers),
                        joined(&g.platforms),
                        joined(&g.genres),
                        g.game_type.clone(),
                    ];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Shown instead of a page body until a file is opened.
pub fn no_dataset(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a games dataset to start  (File → Open…)");
    });
}
