use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;

use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::aggregate::{Category, DistributionGroup};
use crate::data::filter::{self, FamilyFilter, FilterConfig, GameView, PlatformFilter};
use crate::data::loader::{self, LoadedDataset};
use crate::data::model::{CompanyRole, Game, GameTable};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Metrics,
    Ratings,
    Releases,
    Companies,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Metrics,
        Page::Ratings,
        Page::Releases,
        Page::Companies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Metrics => "Metrics & Quality",
            Page::Ratings => "Ratings",
            Page::Releases => "Releases",
            Page::Companies => "Developers & Publishers",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-page controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct HomeControls {
    pub query: String,
    /// Row of the game shown on the card.
    pub selected: Option<usize>,
    pub show_table: bool,
}

#[derive(Debug, Clone)]
pub struct RatingsControls {
    pub reliable_only: bool,
    pub family: String,
    pub top_n: usize,
    pub group: DistributionGroup,
}

impl Default for RatingsControls {
    fn default() -> Self {
        RatingsControls {
            reliable_only: false,
            family: "Nintendo".to_string(),
            top_n: 100,
            group: DistributionGroup::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReleasesControls {
    pub genre_year: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CompaniesControls {
    pub countries_reliable: bool,
    pub countries_by_year: bool,
    pub country_year: Option<i32>,
    pub category: Category,
    pub filter: FilterConfig,
    pub developer_query: String,
    pub publisher_query: String,
}

impl Default for CompaniesControls {
    fn default() -> Self {
        CompaniesControls {
            countries_reliable: true,
            countries_by_year: false,
            country_year: None,
            category: Category::default(),
            filter: FilterConfig::default(),
            developer_query: String::new(),
            publisher_query: String::new(),
        }
    }
}

impl CompaniesControls {
    /// Pick a family (or clear it); any platform selection is dropped.
    pub fn set_family(&mut self, family: Option<&str>) {
        self.filter.family = family.map(FamilyFilter::new);
    }

    /// Pick a platform within the current family; ignored without a family.
    pub fn set_platform(&mut self, platform: Option<&str>) {
        if let Some(family) = &mut self.filter.family {
            family.platform = platform.map(PlatformFilter::new);
        }
    }

    pub fn set_company(&mut self, role: CompanyRole, name: Option<String>) {
        match role {
            CompanyRole::Developer => self.filter.developer = name,
            CompanyRole::Publisher => self.filter.publisher = name,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<LoadedDataset>,

    /// Genre colours shared by every genre pie.
    pub genre_colors: ColorMap,

    pub page: Page,
    pub home: HomeControls,
    pub ratings: RatingsControls,
    pub releases: ReleasesControls,
    pub companies: CompaniesControls,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            dataset: None,
            genre_colors: ColorMap::default(),
            page: Page::default(),
            home: HomeControls::default(),
            ratings: RatingsControls::default(),
            releases: ReleasesControls::default(),
            companies: CompaniesControls::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset the page controls.
    pub fn set_dataset(&mut self, loaded: LoadedDataset) {
        let genres: std::collections::BTreeSet<&str> = loaded
            .table
            .games
            .iter()
            .flat_map(|g| g.genres.iter().map(String::as_str))
            .collect();
        self.genre_colors = ColorMap::new(genres);

        let last_year = loaded.table.year_range().map(|(_, last)| last);
        self.home = HomeControls::default();
        self.releases = ReleasesControls {
            genre_year: last_year,
        };
        self.companies = CompaniesControls {
            country_year: last_year,
            ..CompaniesControls::default()
        };

        self.dataset = Some(loaded);
        self.status_message = None;
    }

    /// Load a file, reporting failure in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(loaded) => {
                log::info!(
                    "Loaded {} games from {} ({} rows rejected)",
                    loaded.table.len(),
                    path.display(),
                    loaded.report.rejected
                );
                self.set_dataset(loaded);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn table(&self) -> Option<&GameTable> {
        self.dataset.as_ref().map(|d| &d.table)
    }

    /// Explorer result for the current toggles, ordered by release date.
    pub fn explorer_view(&self) -> Option<GameView<'_>> {
        let table = self.table()?;
        Some(filter::apply(table, &self.companies.filter).sorted_by_release())
    }

    pub fn selected_game(&self) -> Option<&Game> {
        let table = self.table()?;
        table.games.get(self.home.selected?)
    }

    /// Show a random game on the home card; the search box is cleared so
    /// its results do not override the pick.
    pub fn pick_random(&mut self, rng: &mut impl Rng) {
        let Some(len) = self.table().filter(|t| !t.is_empty()).map(GameTable::len) else {
            return;
        };
        self.home.query.clear();
        self.home.selected = Some(rng.gen_range(0..len));
    }

    /// Write the given rows to CSV.
    pub fn export_rows(&self, path: &Path, rows: &[usize]) -> Result<usize> {
        let table = self.table().context("no dataset loaded")?;
        let written = loader::export_csv(path, rows.iter().filter_map(|&i| table.games.get(i)))?;
        log::info!("Exported {written} games to {}", path.display());
        Ok(written)
    }

    /// Export with the outcome reported in the status line.
    pub fn export_with_status(&mut self, path: &Path, rows: &[usize]) {
        self.status_message = Some(match self.export_rows(path, rows) {
            Ok(n) => format!("Exported {n} games to {}", path.display()),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                format!("Error: {e:#}")
            }
        });
    }
}
