use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{CompanyRole, Game, GameTable, PC_FAMILY};

/// Console families offered by the explorer.
pub const CONSOLE_FAMILIES: [&str; 3] = ["Nintendo", "PlayStation", "Xbox"];

// ---------------------------------------------------------------------------
// Filter configuration – one value per user toggle
// ---------------------------------------------------------------------------

/// Independent toggles; a row passes when it satisfies all active ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub reliable_only: bool,
    /// Exact developer name, as picked from [`search_companies`].
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub family: Option<FamilyFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyFilter {
    pub family: String,
    /// Family set must be exactly `{family}` instead of containing it.
    pub exclusive: bool,
    /// With `exclusive`, `{family, Windows}` also counts.
    pub include_pc: bool,
    pub platform: Option<PlatformFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformFilter {
    pub platform: String,
    /// Membership instead of exact platform set.
    pub backward_compatible: bool,
    /// With exact sets, `{platform, PC}` also counts.
    pub include_pc: bool,
}

impl FamilyFilter {
    pub fn new(family: impl Into<String>) -> Self {
        FamilyFilter {
            family: family.into(),
            exclusive: false,
            include_pc: false,
            platform: None,
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        let set = game.family_set();
        if !self.exclusive {
            return set.contains(self.family.as_str());
        }
        let alone = set.len() == 1 && set.contains(self.family.as_str());
        let with_pc = self.include_pc
            && set.len() == 2
            && set.contains(self.family.as_str())
            && set.contains(PC_FAMILY);
        alone || with_pc
    }
}

impl PlatformFilter {
    pub fn new(platform: impl Into<String>) -> Self {
        PlatformFilter {
            platform: platform.into(),
            backward_compatible: false,
            include_pc: false,
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        let set = game.platform_set();
        let target = self.platform.as_str();
        if self.backward_compatible {
            return set.contains(target);
        }
        let alone = set.len() == 1 && set.contains(target);
        let with_pc = self.include_pc
            && set.len() == 2
            && set.contains(target)
            && set.iter().any(|p| is_pc_platform(p));
        alone || with_pc
    }
}

/// IGDB spells the PC platform "PC (Microsoft Windows)"; older exports say "PC".
pub fn is_pc_platform(platform: &str) -> bool {
    platform == "PC" || platform.starts_with("PC (")
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// One active predicate of the pipeline, in application order.
#[derive(Debug, Clone, Copy)]
enum Stage<'c> {
    Reliable,
    Company(CompanyRole, &'c str),
    Family(&'c FamilyFilter),
    Platform(&'c PlatformFilter),
}

impl Stage<'_> {
    fn keeps(&self, game: &Game) -> bool {
        match self {
            Stage::Reliable => game.has_reliable_votes,
            Stage::Company(role, name) => game.has_company(*role, name),
            Stage::Family(f) => f.matches(game),
            Stage::Platform(p) => p.matches(game),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Stage::Reliable => "reliability",
            Stage::Company(CompanyRole::Developer, _) => "developer",
            Stage::Company(CompanyRole::Publisher, _) => "publisher",
            Stage::Family(_) => "platform family",
            Stage::Platform(_) => "platform",
        }
    }
}

impl FilterConfig {
    fn stages(&self) -> Vec<Stage<'_>> {
        let mut stages = Vec::new();
        if self.reliable_only {
            stages.push(Stage::Reliable);
        }
        if let Some(dev) = &self.developer {
            stages.push(Stage::Company(CompanyRole::Developer, dev));
        }
        if let Some(publisher) = &self.publisher {
            stages.push(Stage::Company(CompanyRole::Publisher, publisher));
        }
        if let Some(family) = &self.family {
            stages.push(Stage::Family(family));
            if let Some(platform) = &family.platform {
                stages.push(Stage::Platform(platform));
            }
        }
        stages
    }
}

/// Rows of a [`GameTable`] selected by a filter; the table itself is untouched.
#[derive(Debug, Clone)]
pub struct GameView<'t> {
    pub table: &'t GameTable,
    pub rows: Vec<usize>,
}

impl<'t> GameView<'t> {
    pub fn all(table: &'t GameTable) -> Self {
        GameView {
            table,
            rows: (0..table.len()).collect(),
        }
    }

    /// No rows, same table (and so the same columns).
    pub fn empty(table: &'t GameTable) -> Self {
        GameView {
            table,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn games(&self) -> impl Iterator<Item = &'t Game> + Clone + '_ {
        let table = self.table;
        self.rows.iter().map(move |&i| &table.games[i])
    }

    /// Narrow further with an ad-hoc predicate.
    pub fn retain(&self, keep: impl Fn(&Game) -> bool) -> GameView<'t> {
        GameView {
            table: self.table,
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|&i| keep(&self.table.games[i]))
                .collect(),
        }
    }

    pub fn reliable(&self) -> GameView<'t> {
        self.retain(|g| g.has_reliable_votes)
    }

    /// Rows ordered by release date (stable for equal dates).
    pub fn sorted_by_release(&self) -> GameView<'t> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|&i| self.table.games[i].first_release_date);
        GameView {
            table: self.table,
            rows,
        }
    }
}

/// Apply every active toggle of `config`, in order.
///
/// As soon as a stage leaves nothing, the remaining stages are skipped and an
/// empty view is returned.
pub fn apply<'t>(table: &'t GameTable, config: &FilterConfig) -> GameView<'t> {
    let mut view = GameView::all(table);
    for stage in config.stages() {
        view.rows.retain(|&i| stage.keeps(&table.games[i]));
        if view.is_empty() {
            log::debug!("Filter stage '{}' left no rows", stage.label());
            return GameView::empty(table);
        }
    }
    view
}

// ---------------------------------------------------------------------------
// Candidate lists for the filter controls
// ---------------------------------------------------------------------------

/// Company names containing `query`, case-insensitively. A blank query yields
/// nothing.
pub fn search_companies(table: &GameTable, role: CompanyRole, query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let found: BTreeSet<&str> = table
        .games
        .iter()
        .flat_map(|g| g.companies(role))
        .map(|c| c.name.as_str())
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect();
    found.into_iter().map(str::to_string).collect()
}

/// Platforms of games exclusive to `family`, minus `excluded`.
pub fn exclusive_platforms(
    table: &GameTable,
    family: &str,
    excluded: &BTreeSet<String>,
) -> BTreeSet<String> {
    table
        .games
        .iter()
        .filter(|g| g.is_exclusive_to(family))
        .flat_map(|g| g.platforms.iter())
        .filter(|p| !excluded.contains(*p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{game, strings};
    use crate::data::model::Company;
    use proptest::prelude::*;

    fn with_families(name: &str, families: &[&str], reliable: bool) -> Game {
        let mut g = game(name, 2020, 80.0);
        g.platform_families = strings(families);
        g.has_reliable_votes = reliable;
        g
    }

    fn with_platforms(name: &str, platforms: &[&str]) -> Game {
        let mut g = game(name, 2020, 80.0);
        g.platforms = strings(platforms);
        g
    }

    fn names<'a>(view: &GameView<'a>) -> Vec<&'a str> {
        view.games().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn exclusive_with_pc_keeps_nintendo_and_nintendo_windows() {
        let table = GameTable::new(vec![
            with_families("A", &["Nintendo"], true),
            with_families("B", &["Nintendo", "Windows"], false),
            with_families("C", &["Xbox"], true),
        ]);
        let config = FilterConfig {
            reliable_only: false,
            family: Some(FamilyFilter {
                exclusive: true,
                include_pc: true,
                ..FamilyFilter::new("Nintendo")
            }),
            ..Default::default()
        };
        assert_eq!(names(&apply(&table, &config)), vec!["A", "B"]);
    }

    #[test]
    fn family_membership_and_strict_exclusivity() {
        let table = GameTable::new(vec![
            with_families("A", &["Nintendo", "Nintendo"], true),
            with_families("B", &["Nintendo", "Windows"], true),
            with_families("C", &["Nintendo", "PlayStation"], true),
        ]);
        let mut family = FamilyFilter::new("Nintendo");
        let mut config = FilterConfig {
            family: Some(family.clone()),
            ..Default::default()
        };
        assert_eq!(names(&apply(&table, &config)), vec!["A", "B", "C"]);

        family.exclusive = true;
        config.family = Some(family);
        assert_eq!(names(&apply(&table, &config)), vec!["A"]);
    }

    #[test]
    fn platform_exact_set_pc_and_backward_compatibility() {
        let table = GameTable::new(vec![
            with_platforms("Switch only", &["Nintendo Switch"]),
            with_platforms("Switch + PC", &["Nintendo Switch", "PC (Microsoft Windows)"]),
            with_platforms("Switch + Wii U", &["Nintendo Switch", "Wii U"]),
            with_platforms("PC only", &["PC (Microsoft Windows)"]),
        ]);
        let game_of = |i: usize| &table.games[i];

        let mut p = PlatformFilter::new("Nintendo Switch");
        assert!(p.matches(game_of(0)));
        assert!(!p.matches(game_of(1)));
        assert!(!p.matches(game_of(2)));

        p.include_pc = true;
        assert!(p.matches(game_of(1)));
        assert!(!p.matches(game_of(2)));
        assert!(!p.matches(game_of(3)));

        p.backward_compatible = true;
        assert!(p.matches(game_of(2)));
        assert!(!p.matches(game_of(3)));
    }

    #[test]
    fn company_stage_matches_exact_names() {
        let mut a = game("A", 2010, 70.0);
        a.developers = vec![Company::new("Nintendo EPD", Some("Japan"))];
        a.publishers = vec![Company::new("Nintendo", Some("Japan"))];
        let mut b = game("B", 2011, 70.0);
        b.developers = vec![Company::new("Nintendo EPD Tokyo", Some("Japan"))];
        let table = GameTable::new(vec![a, b]);

        let config = FilterConfig {
            developer: Some("Nintendo EPD".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&apply(&table, &config)), vec!["A"]);

        assert_eq!(
            search_companies(&table, CompanyRole::Developer, "epd"),
            vec!["Nintendo EPD", "Nintendo EPD Tokyo"]
        );
        assert!(search_companies(&table, CompanyRole::Publisher, "  ").is_empty());
    }

    #[test]
    fn empty_stage_short_circuits_to_empty_view() {
        let table = GameTable::new(vec![with_families("A", &["Xbox"], false)]);
        let config = FilterConfig {
            reliable_only: true,
            family: Some(FamilyFilter::new("Xbox")),
            ..Default::default()
        };
        let view = apply(&table, &config);
        assert!(view.is_empty());
        assert!(std::ptr::eq(view.table, &table));
    }

    #[test]
    fn exclusive_platforms_skip_excluded_and_multi_family_games() {
        let mut a = with_families("A", &["Nintendo", "Nintendo"], true);
        a.platforms = strings(&["Nintendo Switch", "64DD"]);
        let mut b = with_families("B", &["Nintendo", "Xbox"], true);
        b.platforms = strings(&["Wii", "Xbox One"]);
        let table = GameTable::new(vec![a, b]);
        let excluded: BTreeSet<String> = ["64DD".to_string()].into_iter().collect();

        let platforms = exclusive_platforms(&table, "Nintendo", &excluded);
        assert_eq!(platforms.into_iter().collect::<Vec<_>>(), vec!["Nintendo Switch"]);
    }

    fn arb_table() -> impl Strategy<Value = GameTable> {
        let family = prop::sample::select(vec!["Nintendo", "Windows", "Xbox", "PlayStation"]);
        prop::collection::vec((prop::collection::vec(family, 0..4), any::<bool>()), 0..30).prop_map(
            |rows| {
                GameTable::new(
                    rows.into_iter()
                        .enumerate()
                        .map(|(i, (families, reliable))| {
                            with_families(&format!("g{i}"), &families, reliable)
                        })
                        .collect(),
                )
            },
        )
    }

    proptest! {
        #[test]
        fn reliability_filter_is_idempotent(table in arb_table()) {
            let config = FilterConfig { reliable_only: true, ..Default::default() };
            let once = apply(&table, &config);
            let twice = once.reliable();
            prop_assert_eq!(&once.rows, &twice.rows);
        }

        #[test]
        fn pc_inclusive_exclusivity_is_a_superset(
            table in arb_table(),
            family in prop::sample::select(vec!["Nintendo", "Xbox", "PlayStation"]),
        ) {
            let strict = FilterConfig {
                family: Some(FamilyFilter { exclusive: true, ..FamilyFilter::new(family) }),
                ..Default::default()
            };
            let loose = FilterConfig {
                family: Some(FamilyFilter { exclusive: true, include_pc: true, ..FamilyFilter::new(family) }),
                ..Default::default()
            };
            let strict_rows: BTreeSet<usize> = apply(&table, &strict).rows.into_iter().collect();
            let loose_rows: BTreeSet<usize> = apply(&table, &loose).rows.into_iter().collect();
            prop_assert!(strict_rows.is_subset(&loose_rows));
        }
    }
}
