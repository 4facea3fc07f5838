use eframe::egui::{self, Color32, ScrollArea, Ui};

use crate::color::{self, ColorMap};
use crate::data::aggregate::{self, GameModeBucket, LabelCount};
use crate::data::filter::GameView;
use crate::data::model::Game;
use crate::state::AppState;
use crate::ui::plot;

use super::{no_dataset, text_table};

/// Genres beyond this many are merged into "Other" in the pies.
const PIE_GENRES: usize = 12;
const PATH_ROWS: usize = 40;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        dataset,
        releases,
        genre_colors,
        ..
    } = state;
    let Some(loaded) = dataset else {
        no_dataset(ui);
        return;
    };
    let all = GameView::all(&loaded.table);
    let reliable = all.reliable();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Releases per year");
            let counts = |view: &GameView<'_>| -> Vec<(i32, f64)> {
                aggregate::count_by_year(view.games())
                    .into_iter()
                    .map(|c| (c.year, c.count as f64))
                    .collect()
            };
            let igdb: Vec<(i32, f64)> = aggregate::igdb_baseline()
                .into_iter()
                .map(|c| (c.year, c.count as f64))
                .collect();
            plot::year_lines(
                ui,
                "releases_per_year",
                &[
                    ("Reliable votes", color::POSITIVE, counts(&reliable)),
                    ("All rated games", color::HIGHLIGHT, counts(&all)),
                    ("All IGDB releases", Color32::GRAY, igdb),
                ],
            );
            ui.separator();

            ui.heading("Share of indie games (%)");
            let indie = |view: &GameView<'_>| -> Vec<(i32, f64)> {
                aggregate::share_by_year(view.games(), Game::is_indie)
                    .into_iter()
                    .map(|s| (s.year, s.yes_percent))
                    .collect()
            };
            plot::year_lines(
                ui,
                "indie_share",
                &[
                    ("Reliable votes", color::INDIE_SPLIT.0, indie(&reliable)),
                    ("All rated games", color::INDIE_SPLIT.1, indie(&all)),
                ],
            );
            ui.separator();

            ui.heading("Game modes per year (%)");
            let modes = aggregate::share_by_year_and(reliable.games(), |g| {
                GameModeBucket::of(&g.game_modes)
            });
            let palette = ColorMap::new(GameModeBucket::ALL.iter().map(|b| b.label()));
            let series: Vec<(&str, Color32, Vec<(i32, f64)>)> = GameModeBucket::ALL
                .iter()
                .map(|bucket| {
                    let points = modes
                        .iter()
                        .filter(|s| s.label == bucket.label())
                        .map(|s| (s.year, s.percent))
                        .collect();
                    (bucket.label(), palette.color_for(bucket.label()), points)
                })
                .collect();
            plot::year_lines(ui, "game_modes_share", &series);
            ui.separator();

            ui.heading("Genres");
            ui.columns(2, |columns: &mut [Ui]| {
                columns[0].strong("Reliable votes");
                genre_pie(&mut columns[0], "genres_reliable", genre_counts(&reliable), genre_colors);
                columns[1].strong("All rated games");
                genre_pie(&mut columns[1], "genres_all", genre_counts(&all), genre_colors);
            });

            if let Some((first, last)) = loaded.table.year_range() {
                let year = releases.genre_year.get_or_insert(last);
                ui.add(egui::Slider::new(year, first..=last).text("year"));
                let year = *year;
                let released = all.games().filter(|g| g.year() == year).count();
                ui.label(format!("{released} games released in {year}"));
                ui.columns(2, |columns: &mut [Ui]| {
                    columns[0].strong(format!("Reliable votes, {year}"));
                    let counts = genre_counts_in_year(&reliable, year);
                    genre_pie(&mut columns[0], "genres_year_reliable", counts, genre_colors);
                    columns[1].strong(format!("All rated games, {year}"));
                    let counts = genre_counts_in_year(&all, year);
                    genre_pie(&mut columns[1], "genres_year_all", counts, genre_colors);
                });
            }
            ui.separator();

            ui.heading("Paths through reliability, collections, rating, type and DLCs");
            let rows: Vec<Vec<String>> = aggregate::parallel_paths(all.games())
                .into_iter()
                .take(PATH_ROWS)
                .map(|(path, count)| {
                    vec![
                        yes_no(path.reliable),
                        yes_no(path.collection),
                        path.rating.label().to_string(),
                        path.special.label().to_string(),
                        path.dlcs.label().to_string(),
                        count.to_string(),
                    ]
                })
                .collect();
            text_table(
                ui,
                "parallel_paths",
                &["Reliable", "Collection", "Rating", "Type", "DLCs", "Games"],
                &rows,
            );
        });
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

/// Largest genres, the rest summed into "Other".
fn lump_genres(counts: Vec<LabelCount>) -> Vec<LabelCount> {
    if counts.len() <= PIE_GENRES {
        return counts;
    }
    let mut counts = counts;
    let rest: usize = counts.drain(PIE_GENRES..).map(|c| c.count).sum();
    counts.push(LabelCount {
        label: "Other".to_string(),
        count: rest,
    });
    counts
}

fn genre_counts(view: &GameView<'_>) -> Vec<LabelCount> {
    aggregate::explode_counts(view.games(), |g| g.genres.as_slice())
}

fn genre_counts_in_year(view: &GameView<'_>, year: i32) -> Vec<LabelCount> {
    aggregate::explode_counts_in_year(view.games(), |g| g.genres.as_slice(), year)
}

fn genre_pie(ui: &mut Ui, id: &str, counts: Vec<LabelCount>, colors: &ColorMap) {
    let slices: Vec<(String, f64, Color32)> = lump_genres(counts)
        .into_iter()
        .map(|c| {
            let fill = colors.color_for(&c.label);
            (c.label, c.count as f64, fill)
        })
        .collect();
    plot::pie(ui, id, &slices);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{game, strings};
    use crate::data::model::GameTable;

    fn count(label: &str, count: usize) -> LabelCount {
        LabelCount {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn small_genre_tails_are_merged() {
        let counts: Vec<LabelCount> = (0..15).map(|i| count(&format!("g{i}"), 20 - i)).collect();
        let total: usize = counts.iter().map(|c| c.count).sum();
        let lumped = lump_genres(counts);
        assert_eq!(lumped.len(), PIE_GENRES + 1);
        assert_eq!(lumped.last().map(|c| c.label.as_str()), Some("Other"));
        assert_eq!(lumped.iter().map(|c| c.count).sum::<usize>(), total);

        let few = vec![count("Indie", 3), count("Puzzle", 1)];
        assert_eq!(lump_genres(few.clone()), few);
    }

    #[test]
    fn year_genre_counts_follow_the_view() {
        let mut a = game("Celeste", 2018, 92.0);
        a.genres = strings(&["Indie", "Platform"]);
        let mut b = game("Unvoted", 2018, 70.0);
        b.genres = strings(&["Indie"]);
        b.has_reliable_votes = false;
        let mut c = game("Later", 2019, 80.0);
        c.genres = strings(&["Platform"]);
        let table = GameTable::new(vec![a, b, c]);

        let all = GameView::all(&table);
        let indie = |counts: Vec<LabelCount>| {
            counts.into_iter().find(|c| c.label == "Indie").map(|c| c.count)
        };
        assert_eq!(indie(genre_counts_in_year(&all, 2018)), Some(2));
        assert_eq!(indie(genre_counts_in_year(&all.reliable(), 2018)), Some(1));
        assert_eq!(indie(genre_counts_in_year(&all.reliable(), 2019)), None);
    }
}
