use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, ScrollArea, Ui};

use crate::color::{self, ColorMap, SplitColors};
use crate::data::aggregate::{self, DistributionGroup, TopEntry};
use crate::data::filter::GameView;
use crate::data::model::Game;
use crate::state::AppState;
use crate::ui::plot;

use super::{no_dataset, text_table};

const MIN_TOP_N: usize = 10;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        dataset,
        ratings,
        config,
        ..
    } = state;
    let Some(loaded) = dataset else {
        no_dataset(ui);
        return;
    };
    let table = &loaded.table;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.checkbox(&mut ratings.reliable_only, "Only games with reliable votes");
            let all = GameView::all(table);
            let view = if ratings.reliable_only { all.reliable() } else { all };
            ui.label(format!("{} games", view.len()));
            ui.separator();

            ui.heading("Average rating per year");
            let by_year: Vec<(i32, f64)> = aggregate::mean_rating_by_year(view.games())
                .into_iter()
                .map(|v| (v.year, v.value))
                .collect();
            let global = aggregate::global_mean(view.games());
            plot::year_bars(
                ui,
                "rating_by_year",
                &by_year,
                color::HIGHLIGHT,
                global.map(|m| ("Overall mean", m)),
            );
            ui.separator();

            ui.heading("Collections");
            split_section(
                ui,
                "collection",
                &view,
                |g| g.has_collections,
                ("In a collection", "Standalone"),
                color::COLLECTION_SPLIT,
            );
            ui.separator();

            ui.heading("Indie games");
            split_section(
                ui,
                "indie",
                &view,
                Game::is_indie,
                ("Indie", "Not indie"),
                color::INDIE_SPLIT,
            );
            ui.separator();

            ui.heading("Exclusives");
            let families = table.platform_families();
            egui::ComboBox::from_label("Platform family")
                .selected_text(ratings.family.as_str())
                .show_ui(ui, |ui: &mut Ui| {
                    for family in &families {
                        ui.selectable_value(&mut ratings.family, family.clone(), family);
                    }
                });
            let family = ratings.family.clone();
            let family_view = view.retain(|g| g.family_set().contains(family.as_str()));
            split_section(
                ui,
                "family",
                &family_view,
                |g| g.is_exclusive_to(&family),
                ("Exclusive", "Multi-platform"),
                color::family_split(&family),
            );
            ui.separator();

            ui.heading("Among the best rated");
            let range = top_n_range(view.len());
            ratings.top_n = ratings.top_n.clamp(*range.start(), *range.end());
            ui.horizontal(|ui: &mut Ui| {
                ui.add(egui::Slider::new(&mut ratings.top_n, range).text("top games"));
                egui::ComboBox::from_id_salt("distribution_group")
                    .selected_text(ratings.group.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for group in DistributionGroup::ALL {
                            ui.selectable_value(&mut ratings.group, group, group.label());
                        }
                    });
            });
            let shares = aggregate::top_n_distribution(view.games(), ratings.top_n, ratings.group);
            let palette = ColorMap::new(shares.iter().map(|s| s.label.as_str()));
            let slices: Vec<(String, f64, Color32)> = shares
                .iter()
                .map(|s| {
                    let fill = match ratings.group {
                        DistributionGroup::AgeRatings => color::age_rating_color(&s.label),
                        _ => palette.color_for(&s.label),
                    };
                    (s.label.clone(), s.percent, fill)
                })
                .collect();
            plot::pie(ui, "top_distribution", &slices);
            ui.separator();

            ui.heading(format!("Top {}", config.top_list_len));
            top_lists(ui, &view, config.top_list_len);
        });
}

/// Yes/no mean ratings per year plus the yes/no game counts.
fn split_section(
    ui: &mut Ui,
    id: &str,
    view: &GameView<'_>,
    split: impl Fn(&Game) -> bool + Copy,
    names: (&str, &str),
    colors: SplitColors,
) {
    let means: Vec<(i32, Option<f64>, Option<f64>)> =
        aggregate::mean_rating_by_year_split(view.games(), split)
            .into_iter()
            .map(|s| (s.year, s.yes, s.no))
            .collect();
    plot::split_bars(ui, &format!("{id}_means"), &means, names, colors);

    let rows: Vec<Vec<String>> = aggregate::count_by_year_split(view.games(), split)
        .into_iter()
        .map(|c| vec![c.year.to_string(), c.yes.to_string(), c.no.to_string()])
        .collect();
    egui::CollapsingHeader::new("Games per year")
        .id_salt(format!("{id}_counts_header"))
        .show(ui, |ui: &mut Ui| {
            text_table(ui, &format!("{id}_counts"), &["Year", names.0, names.1], &rows);
        });
}

/// From a handful of games up to everything in view.
fn top_n_range(games: usize) -> RangeInclusive<usize> {
    MIN_TOP_N..=games.max(MIN_TOP_N)
}

fn top_rows(entries: &[TopEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| vec![(i + 1).to_string(), e.name.clone(), format!("{:.2}", e.rating)])
        .collect()
}

fn top_lists(ui: &mut Ui, view: &GameView<'_>, n: usize) {
    let lists: [(&str, GameView<'_>); 4] = [
        ("In a collection", view.retain(|g| g.has_collections)),
        ("Not in a collection", view.retain(|g| !g.has_collections)),
        ("Indie", view.retain(Game::is_indie)),
        ("Exclusives", view.retain(Game::is_single_family)),
    ];
    ui.columns(lists.len(), |columns: &mut [Ui]| {
        for (ui, (title, list)) in columns.iter_mut().zip(&lists) {
            ui.strong(*title);
            let rows = top_rows(&aggregate::top_rated(list.games(), n));
            text_table(ui, &format!("top_{title}"), &["#", "Name", "Rating"], &rows);
        }
    });
}
