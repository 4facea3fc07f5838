use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color;
use crate::data::filter::GameView;
use crate::data::model::{Company, Game, MAIN_GAME, PLACEHOLDER_COVER};
use crate::state::AppState;
use crate::ui::panels;

use super::{badge, games_table, no_dataset, yes_no_badge};

const COVER_WIDTH: f32 = 250.0;
const MAX_RESULTS: usize = 200;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        no_dataset(ui);
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Find a game");
            search(ui, state);
            ui.separator();

            if let Some(game) = state.selected_game() {
                game_card(ui, game);
            }
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                ui.checkbox(&mut state.home.show_table, "Show the whole dataset");
                if ui.button("Export as CSV…").clicked() {
                    let rows: Vec<usize> = state
                        .table()
                        .map(|t| (0..t.len()).collect())
                        .unwrap_or_default();
                    panels::export_file_dialog(state, "century_games.csv", &rows);
                }
            });
            if state.home.show_table {
                if let Some(table) = state.table() {
                    games_table(ui, "home_table", &GameView::all(table));
                }
            }
        });
}

fn search(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Name contains");
        ui.text_edit_singleline(&mut state.home.query);
        if ui.button("🎲 Random game").clicked() {
            state.pick_random(&mut rand::thread_rng());
        }
    });

    let AppState { dataset, home, .. } = state;
    let Some(loaded) = dataset else {
        return;
    };
    if home.query.trim().is_empty() {
        return;
    }

    let results = loaded.table.search_names(&home.query);
    ui.label(format!("{} games found", results.len()));
    if results.is_empty() {
        return;
    }
    // keep the card in sync with the results when the current pick is not among them
    if !home.selected.is_some_and(|i| results.contains(&i)) {
        home.selected = results.first().copied();
    }

    let selected_text = home
        .selected
        .and_then(|i| loaded.table.games.get(i))
        .map(|g| g.name.clone())
        .unwrap_or_default();
    egui::ComboBox::from_id_salt("game_results")
        .selected_text(selected_text)
        .width(360.0)
        .show_ui(ui, |ui: &mut Ui| {
            for &i in results.iter().take(MAX_RESULTS) {
                let g = &loaded.table.games[i];
                let label = format!("{} ({})", g.name, g.year());
                ui.selectable_value(&mut home.selected, Some(i), label);
            }
            if results.len() > MAX_RESULTS {
                ui.label(RichText::new("Refine the search to see more").weak());
            }
        });
}

fn companies_label(companies: &[Company]) -> String {
    if companies.is_empty() {
        return "N/A".to_string();
    }
    companies
        .iter()
        .map(Company::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn list_or_na(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

/// Everything known about one game.
fn game_card(ui: &mut Ui, game: &Game) {
    let title = if game.early_access {
        format!("{} (early access)", game.name)
    } else {
        game.name.clone()
    };
    ui.heading(title);

    ui.horizontal_top(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            let (url, caption) = match game.cover_url() {
                Some(url) if game.has_official_cover() => (url, "Official cover"),
                _ => (PLACEHOLDER_COVER.to_string(), "No official cover"),
            };
            ui.add(
                egui::Image::new(url)
                    .max_width(COVER_WIDTH)
                    .corner_radius(4.0),
            );
            ui.label(RichText::new(caption).weak());
            badge(ui, &game.game_type, color::game_type_color(&game.game_type));
        });

        ui.vertical(|ui: &mut Ui| {
            ui.label(format!("First release date: {}", game.first_release_date));
            yes_no_badge(ui, "Part of a collection?", game.has_collections);
            if game.game_type == MAIN_GAME {
                yes_no_badge(ui, "Has a remake?", game.remake);
                yes_no_badge(ui, "Has a remaster?", game.remaster);
            }
            ui.add_space(6.0);
            ui.label(format!("Developers: {}", companies_label(&game.developers)));
            ui.label(format!("Publishers: {}", companies_label(&game.publishers)));
            ui.label(format!("Game modes: {}", list_or_na(&game.game_modes)));
            ui.label(format!(
                "Player perspectives: {}",
                list_or_na(&game.player_perspectives)
            ));
        });

        ui.vertical(|ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Rating:");
                badge(
                    ui,
                    format!("{:.0}", game.total_rating),
                    color::rating_color(game.total_rating),
                );
                if !game.has_reliable_votes {
                    ui.label(RichText::new("(few votes)").weak());
                }
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Age rating:");
                badge(ui, &game.age_rating, color::age_rating_color(&game.age_rating));
            });
            ui.add_space(6.0);

            let platforms: Vec<String> = game
                .platforms
                .iter()
                .enumerate()
                .map(|(i, p)| match game.platform_families.get(i) {
                    Some(family) if family != p => format!("{p} ({family})"),
                    _ => p.clone(),
                })
                .collect();
            ui.label(format!("Platforms: {}", list_or_na(&platforms)));
            ui.label(format!("Platform types: {}", list_or_na(&game.platform_types)));
            if game.generation != 0 {
                ui.label(format!("Platform generation: {}", game.generation));
            }
            ui.label(format!("Genres: {}", list_or_na(&game.genres)));
            ui.label(format!("DLCs: {}", game.dlcs));
        });
    });
}
