use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names of the cleaned dataset (order used for export)
// ---------------------------------------------------------------------------

pub const COLUMNS: [&str; 23] = [
    "name",
    "first_release_date",
    "cover",
    "total_rating",
    "developer_company",
    "developer_country",
    "publisher_company",
    "publisher_country",
    "platforms",
    "platform_family",
    "platform_type",
    "generation_platform",
    "game_type",
    "game_modes",
    "player_perspectives",
    "genres",
    "remake",
    "remaster",
    "early_access",
    "dlcs",
    "age_rattings",
    "has_reliable_votes",
    "has_collections",
];

/// Platform family that stands for PC releases.
pub const PC_FAMILY: &str = "Windows";

/// Age rating buckets the dataset is expected to use.
pub const AGE_RATINGS: [&str; 5] = ["Everyone", "Child", "Teen", "Young", "18+"];

/// Game type of original releases (remake/remaster flags only apply to these).
pub const MAIN_GAME: &str = "Main Game";

/// Stand-in image the dataset uses for games without an official cover.
pub const PLACEHOLDER_COVER: &str = "https://i.imgur.com/VsWBrKg.jpeg";

// ---------------------------------------------------------------------------
// Company – developer or publisher with its country
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// `None` when the source listed fewer countries than companies.
    pub country: Option<String>,
}

impl Company {
    pub fn new(name: impl Into<String>, country: Option<&str>) -> Self {
        Company {
            name: name.into(),
            country: country.map(str::to_string),
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.country.as_deref().unwrap_or("N/A"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyRole {
    Developer,
    Publisher,
}

impl CompanyRole {
    pub fn label(self) -> &'static str {
        match self {
            CompanyRole::Developer => "developer",
            CompanyRole::Publisher => "publisher",
        }
    }
}

// ---------------------------------------------------------------------------
// Game – one row of the dataset
// ---------------------------------------------------------------------------

/// A single released title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub first_release_date: NaiveDate,
    pub cover: Option<String>,
    /// Expected in [0, 100]; checked by the quality report, not enforced.
    pub total_rating: f64,
    pub developers: Vec<Company>,
    pub publishers: Vec<Company>,
    pub platforms: Vec<String>,
    pub platform_families: Vec<String>,
    pub platform_types: Vec<String>,
    pub generation: i64,
    pub game_type: String,
    pub game_modes: Vec<String>,
    pub player_perspectives: Vec<String>,
    pub genres: Vec<String>,
    pub remake: bool,
    pub remaster: bool,
    pub early_access: bool,
    pub dlcs: i64,
    pub age_rating: String,
    pub has_reliable_votes: bool,
    pub has_collections: bool,
}

impl Game {
    pub fn year(&self) -> i32 {
        self.first_release_date.year()
    }

    pub fn companies(&self, role: CompanyRole) -> &[Company] {
        match role {
            CompanyRole::Developer => &self.developers,
            CompanyRole::Publisher => &self.publishers,
        }
    }

    pub fn has_company(&self, role: CompanyRole, name: &str) -> bool {
        self.companies(role).iter().any(|c| c.name == name)
    }

    /// Distinct platform families (a PS4 + PS5 game has one family).
    pub fn family_set(&self) -> BTreeSet<&str> {
        self.platform_families.iter().map(String::as_str).collect()
    }

    pub fn platform_set(&self) -> BTreeSet<&str> {
        self.platforms.iter().map(String::as_str).collect()
    }

    pub fn is_indie(&self) -> bool {
        self.genres.iter().any(|g| g == "Indie")
    }

    /// Released on exactly one platform family.
    pub fn is_single_family(&self) -> bool {
        self.family_set().len() == 1
    }

    /// Exclusive to `family`, PC releases not counted as exclusive.
    pub fn is_exclusive_to(&self, family: &str) -> bool {
        let set = self.family_set();
        set.len() == 1 && set.contains(family)
    }

    /// `platforms` and `platform_family` are positionally paired.
    pub fn platforms_consistent(&self) -> bool {
        self.platforms.len() == self.platform_families.len()
    }

    /// Cover URL ready for loading; IGDB URLs come scheme-relative.
    pub fn cover_url(&self) -> Option<String> {
        let cover = self.cover.as_deref()?;
        if cover.starts_with("//") {
            Some(format!("https:{cover}"))
        } else {
            Some(cover.to_string())
        }
    }

    pub fn has_official_cover(&self) -> bool {
        self.cover_url().is_some_and(|url| url != PLACEHOLDER_COVER)
    }
}

// ---------------------------------------------------------------------------
// GameTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable table of games, loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    pub games: Vec<Game>,
}

impl GameTable {
    pub fn new(games: Vec<Game>) -> Self {
        GameTable { games }
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Every platform family present, sorted.
    pub fn platform_families(&self) -> BTreeSet<String> {
        self.games
            .iter()
            .flat_map(|g| g.platform_families.iter().cloned())
            .collect()
    }

    /// Earliest and latest release year.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.games.iter().map(Game::year).min()?;
        let max = self.games.iter().map(Game::year).max()?;
        Some((min, max))
    }

    /// Case-insensitive substring search on game names.
    pub fn search_names(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.games
            .iter()
            .enumerate()
            .filter(|(_, g)| g.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{game, strings};
    use super::*;

    #[test]
    fn exclusivity_uses_distinct_families() {
        let mut g = game("Zelda", 2017, 97.0);
        g.platforms = strings(&["Switch", "Wii U"]);
        g.platform_families = strings(&["Nintendo", "Nintendo"]);
        assert!(g.is_single_family());
        assert!(g.is_exclusive_to("Nintendo"));
        assert!(!g.is_exclusive_to("Xbox"));
        assert!(g.platforms_consistent());

        g.platform_families.push("Windows".to_string());
        assert!(!g.is_exclusive_to("Nintendo"));
        assert!(!g.platforms_consistent());
    }

    #[test]
    fn cover_url_gets_scheme() {
        let mut g = game("Celeste", 2018, 92.0);
        assert_eq!(g.cover_url(), None);
        g.cover = Some("//images.igdb.com/igdb/image/upload/t_thumb/co1.jpg".to_string());
        assert_eq!(
            g.cover_url().as_deref(),
            Some("https://images.igdb.com/igdb/image/upload/t_thumb/co1.jpg")
        );
        assert!(g.has_official_cover());
        g.cover = Some(PLACEHOLDER_COVER.to_string());
        assert!(!g.has_official_cover());
    }

    #[test]
    fn company_display_falls_back_to_na() {
        assert_eq!(Company::new("Nintendo EPD", Some("Japan")).to_string(), "Nintendo EPD (Japan)");
        assert_eq!(Company::new("Tiny Studio", None).to_string(), "Tiny Studio (N/A)");
    }

    #[test]
    fn table_search_and_ranges() {
        let table = GameTable::new(vec![
            game("Halo: Combat Evolved", 2001, 90.0),
            game("Halo 3", 2007, 94.0),
            game("Portal", 2007, 90.0),
        ]);
        assert_eq!(table.search_names("halo"), vec![0, 1]);
        assert!(table.search_names("   ").is_empty());
        assert_eq!(table.year_range(), Some((2001, 2007)));
    }
}
