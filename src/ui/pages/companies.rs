use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color;
use crate::data::aggregate::{self, Category, CountryCount};
use crate::data::filter::{self, GameView, CONSOLE_FAMILIES};
use crate::data::model::{CompanyRole, GameTable};
use crate::geo::IsoCountries;
use crate::state::{AppState, CompaniesControls};
use crate::ui::{panels, plot};

use super::{games_table, no_dataset, text_table};

/// Countries shown in the bar chart.
const CHART_COUNTRIES: usize = 20;
const MAX_CANDIDATES: usize = 200;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        no_dataset(ui);
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Where games are made");
            countries(ui, state);
            ui.separator();

            ui.heading("Explorer");
            let excluded = state.config.excluded_platform_set();
            if let Some(loaded) = &state.dataset {
                explorer_controls(ui, &loaded.table, &mut state.companies, &excluded);
            }
            explorer_output(ui, state);
        });
}

// ---------------------------------------------------------------------------
// Countries
// ---------------------------------------------------------------------------

fn countries(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        dataset, companies, ..
    } = state;
    let Some(loaded) = dataset else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(&mut companies.countries_reliable, "Only games with reliable votes");
        ui.checkbox(&mut companies.countries_by_year, "Per year");
    });
    let all = GameView::all(&loaded.table);
    let view = if companies.countries_reliable { all.reliable() } else { all };

    let mut counts = aggregate::country_counts(view.games(), companies.countries_by_year, &IsoCountries);
    if companies.countries_by_year {
        if let Some((first, last)) = loaded.table.year_range() {
            let year = companies.country_year.get_or_insert(last);
            ui.add(egui::Slider::new(year, first..=last).text("year"));
            let year = *year;
            counts.retain(|c| c.year == Some(year));
        }
    }
    counts.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.country.cmp(&b.country)));

    let charted: Vec<&CountryCount> = counts
        .iter()
        .filter(|c| c.alpha3.is_some())
        .take(CHART_COUNTRIES)
        .collect();
    let labels: Vec<String> = charted
        .iter()
        .filter_map(|c| c.alpha3.map(str::to_string))
        .collect();
    plot::stacked_label_bars(
        ui,
        "countries",
        &labels,
        [
            ("Developers", color::HIGHLIGHT, charted.iter().map(|c| c.developer as f64).collect()),
            ("Publishers", color::POSITIVE, charted.iter().map(|c| c.publisher as f64).collect()),
        ],
    );

    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|c| {
            vec![
                c.country.clone(),
                c.alpha3.unwrap_or("–").to_string(),
                c.developer.to_string(),
                c.publisher.to_string(),
                c.total().to_string(),
            ]
        })
        .collect();
    text_table(
        ui,
        "country_table",
        &["Country", "ISO", "Developers", "Publishers", "Total"],
        &rows,
    );
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

/// Company picker fed by a substring search; returns the new pick when it changed.
fn company_picker(
    ui: &mut Ui,
    table: &GameTable,
    role: CompanyRole,
    query: &mut String,
    current: Option<String>,
) -> Option<Option<String>> {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} contains", role.label()));
        ui.text_edit_singleline(query);
    });
    let candidates = filter::search_companies(table, role, query);
    if !query.trim().is_empty() {
        ui.label(RichText::new(format!("{} matches", candidates.len())).weak());
    }

    let mut picked = current.clone();
    egui::ComboBox::from_id_salt(format!("pick_{}", role.label()))
        .selected_text(picked.as_deref().unwrap_or("Any"))
        .width(300.0)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut picked, None, "Any");
            for name in candidates.iter().take(MAX_CANDIDATES) {
                ui.selectable_value(&mut picked, Some(name.clone()), name);
            }
        });
    (picked != current).then_some(picked)
}

fn explorer_controls(
    ui: &mut Ui,
    table: &GameTable,
    controls: &mut CompaniesControls,
    excluded: &BTreeSet<String>,
) {
    ui.horizontal(|ui: &mut Ui| {
        egui::ComboBox::from_label("Category")
            .selected_text(controls.category.label())
            .show_ui(ui, |ui: &mut Ui| {
                for category in Category::ALL {
                    ui.selectable_value(&mut controls.category, category, category.label());
                }
            });
        ui.checkbox(&mut controls.filter.reliable_only, "Only games with reliable votes");
    });

    if let Some(picked) = company_picker(
        ui,
        table,
        CompanyRole::Developer,
        &mut controls.developer_query,
        controls.filter.developer.clone(),
    ) {
        controls.set_company(CompanyRole::Developer, picked);
    }
    if let Some(picked) = company_picker(
        ui,
        table,
        CompanyRole::Publisher,
        &mut controls.publisher_query,
        controls.filter.publisher.clone(),
    ) {
        controls.set_company(CompanyRole::Publisher, picked);
    }
    ui.add_space(4.0);

    let current_family = controls.filter.family.as_ref().map(|f| f.family.clone());
    let mut picked_family = current_family.clone();
    egui::ComboBox::from_label("Console family")
        .selected_text(picked_family.as_deref().unwrap_or("Any"))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut picked_family, None, "Any");
            for family in CONSOLE_FAMILIES {
                ui.selectable_value(&mut picked_family, Some(family.to_string()), family);
            }
        });
    if picked_family != current_family {
        controls.set_family(picked_family.as_deref());
    }

    let Some(family) = &mut controls.filter.family else {
        return;
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(&mut family.exclusive, "Exclusive");
        ui.add_enabled(
            family.exclusive,
            egui::Checkbox::new(&mut family.include_pc, "Also on PC"),
        );
    });

    let platforms = filter::exclusive_platforms(table, &family.family, excluded);
    let current_platform = family.platform.as_ref().map(|p| p.platform.clone());
    let mut picked_platform = current_platform.clone();
    egui::ComboBox::from_label("Platform")
        .selected_text(picked_platform.as_deref().unwrap_or("Any"))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut picked_platform, None, "Any");
            for platform in &platforms {
                ui.selectable_value(&mut picked_platform, Some(platform.clone()), platform);
            }
        });
    if picked_platform != current_platform {
        controls.set_platform(picked_platform.as_deref());
    }

    let platform = controls
        .filter
        .family
        .as_mut()
        .and_then(|f| f.platform.as_mut());
    if let Some(platform) = platform {
        ui.horizontal(|ui: &mut Ui| {
            ui.checkbox(&mut platform.backward_compatible, "Backward compatible");
            ui.add_enabled(
                !platform.backward_compatible,
                egui::Checkbox::new(&mut platform.include_pc, "Also on PC"),
            );
        });
    }
}

fn explorer_output(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = state.explorer_view() else {
        return;
    };
    ui.label(RichText::new(format!("{} games", view.len())).size(20.0).strong());
    if view.is_empty() {
        ui.label("No game matches these filters.");
        return;
    }

    let category = state.companies.category;
    let counts = aggregate::category_counts(view.games(), category);
    let slices: Vec<(String, f64, Color32)> = counts
        .into_iter()
        .map(|c| {
            let fill = match category {
                Category::GameType => color::game_type_color(&c.label),
                Category::AgeRating => color::age_rating_color(&c.label),
                Category::Genres => state.genre_colors.color_for(&c.label),
            };
            (c.label, c.count as f64, fill)
        })
        .collect();
    plot::pie(ui, "explorer_category", &slices);

    games_table(ui, "explorer_table", &view);
    let rows = view.rows.clone();
    if ui.button("Export these games as CSV…").clicked() {
        panels::export_file_dialog(state, "explorer.csv", &rows);
    }
}
