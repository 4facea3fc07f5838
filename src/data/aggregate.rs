use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{CompanyRole, Game, AGE_RATINGS};
use super::quality::round2;
use crate::geo::CountryResolver;

// ---------------------------------------------------------------------------
// Summary rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Mean per year, pivoted on a yes/no split. A side with no games is `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearSplit {
    pub year: i32,
    pub yes: Option<f64>,
    pub no: Option<f64>,
}

/// Counts per year, pivoted on a yes/no split. A side with no games is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSplitCounts {
    pub year: i32,
    pub yes: usize,
    pub no: usize,
}

/// Yes/no shares of one year's games, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearShare {
    pub year: i32,
    pub yes_percent: f64,
    pub no_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelShare {
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearLabelShare {
    pub year: i32,
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Default, Clone, Copy)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn add(&mut self, v: f64) {
        self.sum += v;
        self.n += 1;
    }

    fn get(self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Plain mean of a series, used for the dashed reference lines.
pub fn mean_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut mean = Mean::default();
    values.into_iter().for_each(|v| mean.add(v));
    mean.get()
}

/// Mean rating over every game of the view.
pub fn global_mean<'a>(games: impl IntoIterator<Item = &'a Game>) -> Option<f64> {
    mean_of(games.into_iter().map(|g| g.total_rating))
}

// ---------------------------------------------------------------------------
// Ratings per year
// ---------------------------------------------------------------------------

pub fn mean_rating_by_year<'a>(games: impl IntoIterator<Item = &'a Game>) -> Vec<YearValue> {
    let mut by_year: BTreeMap<i32, Mean> = BTreeMap::new();
    for g in games {
        by_year.entry(g.year()).or_default().add(g.total_rating);
    }
    by_year
        .into_iter()
        .filter_map(|(year, mean)| Some(YearValue { year, value: mean.get()? }))
        .collect()
}

pub fn mean_rating_by_year_split<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    split: impl Fn(&Game) -> bool,
) -> Vec<YearSplit> {
    let mut by_year: BTreeMap<i32, (Mean, Mean)> = BTreeMap::new();
    for g in games {
        let (yes, no) = by_year.entry(g.year()).or_default();
        if split(g) {
            yes.add(g.total_rating);
        } else {
            no.add(g.total_rating);
        }
    }
    by_year
        .into_iter()
        .map(|(year, (yes, no))| YearSplit {
            year,
            yes: yes.get(),
            no: no.get(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Release volume
// ---------------------------------------------------------------------------

pub fn count_by_year<'a>(games: impl IntoIterator<Item = &'a Game>) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for g in games {
        *by_year.entry(g.year()).or_default() += 1;
    }
    by_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

pub fn count_by_year_split<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    split: impl Fn(&Game) -> bool,
) -> Vec<YearSplitCounts> {
    let mut by_year: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
    for g in games {
        let (yes, no) = by_year.entry(g.year()).or_default();
        if split(g) {
            *yes += 1;
        } else {
            *no += 1;
        }
    }
    by_year
        .into_iter()
        .map(|(year, (yes, no))| YearSplitCounts { year, yes, no })
        .collect()
}

/// Yes/no shares where the denominator is the same year's games.
pub fn share_by_year<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    split: impl Fn(&Game) -> bool,
) -> Vec<YearShare> {
    count_by_year_split(games, split)
        .into_iter()
        .map(|c| YearShare {
            year: c.year,
            yes_percent: percent(c.yes, c.yes + c.no),
            no_percent: percent(c.no, c.yes + c.no),
        })
        .collect()
}

/// Share of each label within its year; labels must partition the games for
/// the shares of a year to add up to 100.
pub fn share_by_year_and<'a, K: Ord + ToString>(
    games: impl IntoIterator<Item = &'a Game>,
    key: impl Fn(&Game) -> K,
) -> Vec<YearLabelShare> {
    let mut by_year: BTreeMap<i32, BTreeMap<K, usize>> = BTreeMap::new();
    for g in games {
        *by_year.entry(g.year()).or_default().entry(key(g)).or_default() += 1;
    }
    let mut out = Vec::new();
    for (year, labels) in by_year {
        let total: usize = labels.values().sum();
        for (label, count) in labels {
            out.push(YearLabelShare {
                year,
                label: label.to_string(),
                count,
                percent: percent(count, total),
            });
        }
    }
    out
}

/// Yearly totals published by IGDB for every game, rated or not.
pub const IGDB_RELEASES: [(i32, usize); 26] = [
    (2000, 1563),
    (2001, 1610),
    (2002, 1639),
    (2003, 1578),
    (2004, 1533),
    (2005, 1752),
    (2006, 1908),
    (2007, 2196),
    (2008, 2437),
    (2009, 2906),
    (2010, 3021),
    (2011, 2968),
    (2012, 3090),
    (2013, 3286),
    (2014, 4282),
    (2015, 5517),
    (2016, 7626),
    (2017, 10303),
    (2018, 10961),
    (2019, 10259),
    (2020, 11511),
    (2021, 13822),
    (2022, 13725),
    (2023, 16778),
    (2024, 20718),
    (2025, 16832),
];

pub fn igdb_baseline() -> Vec<YearCount> {
    IGDB_RELEASES
        .iter()
        .map(|&(year, count)| YearCount { year, count })
        .collect()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Count every element of a list column (one game counts once per element),
/// most frequent first.
pub fn explode_counts<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    items: impl Fn(&Game) -> &[String],
) -> Vec<LabelCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for g in games {
        for item in items(g) {
            *counts.entry(item.as_str()).or_default() += 1;
        }
    }
    sorted_counts(counts)
}

/// [`explode_counts`] restricted to the games released in `year`.
pub fn explode_counts_in_year<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    items: impl Fn(&Game) -> &[String],
    year: i32,
) -> Vec<LabelCount> {
    explode_counts(games.into_iter().filter(|g| g.year() == year), items)
}

fn sorted_counts(counts: BTreeMap<&str, usize>) -> Vec<LabelCount> {
    let mut out: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    // BTreeMap order already breaks ties by label
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    GameType,
    AgeRating,
    Genres,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::GameType, Category::AgeRating, Category::Genres];

    pub fn label(self) -> &'static str {
        match self {
            Category::GameType => "Game type",
            Category::AgeRating => "Age rating",
            Category::Genres => "Genres",
        }
    }
}

/// Counts per category value; genres are exploded first.
pub fn category_counts<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    category: Category,
) -> Vec<LabelCount> {
    match category {
        Category::Genres => explode_counts(games, |g| g.genres.as_slice()),
        Category::GameType | Category::AgeRating => {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for g in games {
                let value = match category {
                    Category::GameType => g.game_type.as_str(),
                    _ => g.age_rating.as_str(),
                };
                *counts.entry(value).or_default() += 1;
            }
            sorted_counts(counts)
        }
    }
}

// ---------------------------------------------------------------------------
// Countries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub country: String,
    /// `None` when the resolver does not know the name; such rows stay in the
    /// table but cannot be placed on a map.
    pub alpha3: Option<&'static str>,
    pub year: Option<i32>,
    pub developer: usize,
    pub publisher: usize,
}

impl CountryCount {
    pub fn total(&self) -> usize {
        self.developer + self.publisher
    }
}

/// Developer and publisher country occurrences, pivoted side by side.
pub fn country_counts<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    by_year: bool,
    resolver: &dyn CountryResolver,
) -> Vec<CountryCount> {
    let mut counts: BTreeMap<(Option<i32>, &str), (usize, usize)> = BTreeMap::new();
    for g in games {
        let year = by_year.then(|| g.year());
        for role in [CompanyRole::Developer, CompanyRole::Publisher] {
            for country in g.companies(role).iter().filter_map(|c| c.country.as_deref()) {
                let (dev, publ) = counts.entry((year, country)).or_default();
                match role {
                    CompanyRole::Developer => *dev += 1,
                    CompanyRole::Publisher => *publ += 1,
                }
            }
        }
    }
    counts
        .into_iter()
        .map(|((year, country), (developer, publisher))| CountryCount {
            country: country.to_string(),
            alpha3: resolver.alpha3(country),
            year,
            developer,
            publisher,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Top lists and distributions among the best rated
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TopEntry {
    pub name: String,
    pub rating: f64,
    pub reliable: bool,
}

fn by_rating_desc<'a>(games: impl IntoIterator<Item = &'a Game>) -> Vec<&'a Game> {
    let mut sorted: Vec<&Game> = games.into_iter().collect();
    sorted.sort_by(|a, b| b.total_rating.total_cmp(&a.total_rating));
    sorted
}

pub fn top_rated<'a>(games: impl IntoIterator<Item = &'a Game>, n: usize) -> Vec<TopEntry> {
    by_rating_desc(games)
        .into_iter()
        .take(n)
        .map(|g| TopEntry {
            name: g.name.clone(),
            rating: round2(g.total_rating),
            reliable: g.has_reliable_votes,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistributionGroup {
    #[default]
    Collections,
    GameModes,
    AgeRatings,
}

impl DistributionGroup {
    pub const ALL: [DistributionGroup; 3] = [
        DistributionGroup::Collections,
        DistributionGroup::GameModes,
        DistributionGroup::AgeRatings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DistributionGroup::Collections => "Collections",
            DistributionGroup::GameModes => "Game modes",
            DistributionGroup::AgeRatings => "Age ratings",
        }
    }
}

/// Disjoint buckets of the `game_modes` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GameModeBucket {
    SinglePlayer,
    Multiplayer,
    Both,
    Other,
}

const PLAYER_MODES: [&str; 3] = ["Single player", "Multiplayer", "Co-operative"];

impl GameModeBucket {
    pub const ALL: [GameModeBucket; 4] = [
        GameModeBucket::SinglePlayer,
        GameModeBucket::Multiplayer,
        GameModeBucket::Both,
        GameModeBucket::Other,
    ];

    pub fn of(modes: &[String]) -> Self {
        match modes {
            [only] if only == "Single player" => GameModeBucket::SinglePlayer,
            [only] if only == "Multiplayer" || only == "Co-operative" => {
                GameModeBucket::Multiplayer
            }
            [_, _, ..] if modes.iter().any(|m| PLAYER_MODES.contains(&m.as_str())) => {
                GameModeBucket::Both
            }
            _ => GameModeBucket::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameModeBucket::SinglePlayer => "Single Player",
            GameModeBucket::Multiplayer => "Multiplayer / Co-op",
            GameModeBucket::Both => "Both Modes",
            GameModeBucket::Other => "Other Modes",
        }
    }
}

impl fmt::Display for GameModeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category shares among the `n` best rated games.
pub fn top_n_distribution<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    n: usize,
    group: DistributionGroup,
) -> Vec<LabelShare> {
    let top: Vec<&Game> = by_rating_desc(games).into_iter().take(n).collect();
    if top.is_empty() {
        return Vec::new();
    }
    let share = |keep: &dyn Fn(&Game) -> bool| {
        percent(top.iter().filter(|g| keep(**g)).count(), top.len())
    };

    match group {
        DistributionGroup::Collections => {
            let yes = share(&|g: &Game| g.has_collections);
            vec![
                LabelShare {
                    label: "Collection True".to_string(),
                    percent: yes,
                },
                LabelShare {
                    label: "Collection False".to_string(),
                    percent: 100.0 - yes,
                },
            ]
        }
        DistributionGroup::GameModes => GameModeBucket::ALL
            .iter()
            .map(|&bucket| LabelShare {
                label: bucket.label().to_string(),
                percent: share(&|g: &Game| GameModeBucket::of(&g.game_modes) == bucket),
            })
            .collect(),
        DistributionGroup::AgeRatings => AGE_RATINGS
            .iter()
            .map(|&age| LabelShare {
                label: age.to_string(),
                percent: share(&|g: &Game| g.age_rating == age),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Parallel categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatingBand {
    Below60,
    From60,
    From75,
    From90,
}

impl RatingBand {
    /// Upper bounds are inclusive: 60 is "<60", 90 is "75–89".
    pub fn of(rating: f64) -> Self {
        if rating <= 60.0 {
            RatingBand::Below60
        } else if rating <= 75.0 {
            RatingBand::From60
        } else if rating <= 90.0 {
            RatingBand::From75
        } else {
            RatingBand::From90
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingBand::Below60 => "<60",
            RatingBand::From60 => "60–74",
            RatingBand::From75 => "75–89",
            RatingBand::From90 => "90+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DlcBand {
    Zero,
    One,
    TwoToFive,
    SixToTen,
    ElevenToTwenty,
    MoreThanTwenty,
}

impl DlcBand {
    pub fn of(dlcs: i64) -> Self {
        match dlcs {
            i64::MIN..=0 => DlcBand::Zero,
            1 => DlcBand::One,
            2..=5 => DlcBand::TwoToFive,
            6..=10 => DlcBand::SixToTen,
            11..=20 => DlcBand::ElevenToTwenty,
            _ => DlcBand::MoreThanTwenty,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DlcBand::Zero => "0",
            DlcBand::One => "1",
            DlcBand::TwoToFive => "2–5",
            DlcBand::SixToTen => "6–10",
            DlcBand::ElevenToTwenty => "11–20",
            DlcBand::MoreThanTwenty => "20+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecialType {
    Remake,
    Remaster,
    EarlyAccess,
    None,
}

impl SpecialType {
    /// First matching flag wins: remake, remaster, early access.
    pub fn of(game: &Game) -> Self {
        if game.remake {
            SpecialType::Remake
        } else if game.remaster {
            SpecialType::Remaster
        } else if game.early_access {
            SpecialType::EarlyAccess
        } else {
            SpecialType::None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpecialType::Remake => "has_remake",
            SpecialType::Remaster => "has_remaster",
            SpecialType::EarlyAccess => "has_early_access",
            SpecialType::None => "none",
        }
    }
}

/// One path through the parallel-categories dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParallelPath {
    pub reliable: bool,
    pub collection: bool,
    pub rating: RatingBand,
    pub special: SpecialType,
    pub dlcs: DlcBand,
}

impl ParallelPath {
    pub fn of(game: &Game) -> Self {
        ParallelPath {
            reliable: game.has_reliable_votes,
            collection: game.has_collections,
            rating: RatingBand::of(game.total_rating),
            special: SpecialType::of(game),
            dlcs: DlcBand::of(game.dlcs),
        }
    }
}

/// Games per path, most common first.
pub fn parallel_paths<'a>(games: impl IntoIterator<Item = &'a Game>) -> Vec<(ParallelPath, usize)> {
    let mut counts: BTreeMap<ParallelPath, usize> = BTreeMap::new();
    for g in games {
        *counts.entry(ParallelPath::of(g)).or_default() += 1;
    }
    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

// ---------------------------------------------------------------------------
// Headline numbers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kpis {
    pub total: usize,
    pub reliable: usize,
    pub average_rating: Option<f64>,
    pub average_reliable_rating: Option<f64>,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

pub fn kpis<'a>(games: impl IntoIterator<Item = &'a Game>) -> Kpis {
    let mut all = Mean::default();
    let mut reliable = Mean::default();
    let mut first_year: Option<i32> = None;
    let mut last_year: Option<i32> = None;
    for g in games {
        all.add(g.total_rating);
        if g.has_reliable_votes {
            reliable.add(g.total_rating);
        }
        let year = g.year();
        first_year = Some(first_year.map_or(year, |y| y.min(year)));
        last_year = Some(last_year.map_or(year, |y| y.max(year)));
    }
    Kpis {
        total: all.n,
        reliable: reliable.n,
        average_rating: all.get().map(round2),
        average_reliable_rating: reliable.get().map(round2),
        first_year,
        last_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{game, strings};
    use crate::data::model::Company;
    use crate::geo::IsoCountries;

    fn rated(year: i32, rating: f64, flag: bool) -> Game {
        let mut g = game("g", year, rating);
        g.has_collections = flag;
        g
    }

    fn with_modes(year: i32, modes: &[&str]) -> Game {
        let mut g = game("g", year, 70.0);
        g.game_modes = strings(modes);
        g
    }

    #[test]
    fn yearly_means_and_pivot() {
        let games = vec![
            rated(2001, 80.0, true),
            rated(2001, 60.0, false),
            rated(2001, 70.0, false),
            rated(2002, 90.0, true),
        ];
        assert_eq!(
            mean_rating_by_year(&games),
            vec![
                YearValue { year: 2001, value: 70.0 },
                YearValue { year: 2002, value: 90.0 }
            ]
        );
        assert_eq!(
            mean_rating_by_year_split(&games, |g| g.has_collections),
            vec![
                YearSplit { year: 2001, yes: Some(80.0), no: Some(65.0) },
                YearSplit { year: 2002, yes: Some(90.0), no: None },
            ]
        );
        assert_eq!(
            count_by_year_split(&games, |g| g.has_collections),
            vec![
                YearSplitCounts { year: 2001, yes: 1, no: 2 },
                YearSplitCounts { year: 2002, yes: 1, no: 0 },
            ]
        );
        assert_eq!(mean_of([70.0, 90.0]), Some(80.0));
        assert_eq!(mean_of(std::iter::empty()), None);
        assert_eq!(global_mean(&games), Some(75.0));
    }

    #[test]
    fn shares_use_the_year_as_denominator() {
        let mut games = Vec::new();
        for i in 0..4 {
            let mut g = game("g", 2010, 70.0);
            g.genres = if i == 0 { strings(&["Indie"]) } else { Vec::new() };
            games.push(g);
        }
        let mut indie = game("g", 2011, 70.0);
        indie.genres = strings(&["Indie", "Puzzle"]);
        games.push(indie);

        let shares = share_by_year(&games, Game::is_indie);
        assert_eq!(shares[0], YearShare { year: 2010, yes_percent: 25.0, no_percent: 75.0 });
        assert_eq!(shares[1], YearShare { year: 2011, yes_percent: 100.0, no_percent: 0.0 });
        for s in &shares {
            assert!((s.yes_percent + s.no_percent - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn game_mode_buckets_partition_each_year() {
        let games = vec![
            with_modes(2015, &["Single player"]),
            with_modes(2015, &["Multiplayer"]),
            with_modes(2015, &["Co-operative"]),
            with_modes(2015, &["Single player", "Multiplayer"]),
            with_modes(2015, &["Battle Royale"]),
            with_modes(2015, &[]),
            with_modes(2016, &["Single player", "Split screen"]),
        ];
        assert_eq!(GameModeBucket::of(&games[3].game_modes), GameModeBucket::Both);
        assert_eq!(GameModeBucket::of(&games[4].game_modes), GameModeBucket::Other);
        assert_eq!(GameModeBucket::of(&games[6].game_modes), GameModeBucket::Both);

        let shares = share_by_year_and(&games, |g| GameModeBucket::of(&g.game_modes));
        for year_count in count_by_year(&games) {
            let rows: Vec<_> = shares.iter().filter(|s| s.year == year_count.year).collect();
            let count: usize = rows.iter().map(|s| s.count).sum();
            let pct: f64 = rows.iter().map(|s| s.percent).sum();
            assert_eq!(count, year_count.count);
            assert!((pct - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn top_n_distribution_takes_best_rated_first() {
        let mut games = vec![
            rated(2000, 95.0, true),
            rated(2000, 90.0, true),
            rated(2000, 40.0, false),
            rated(2000, 30.0, false),
        ];
        games[0].age_rating = "Teen".to_string();
        games[1].age_rating = "Unrated".to_string();

        let collections = top_n_distribution(&games, 2, DistributionGroup::Collections);
        assert_eq!(collections[0].percent, 100.0);
        assert_eq!(collections[1].percent, 0.0);

        let modes = top_n_distribution(&games, 4, DistributionGroup::GameModes);
        let total: f64 = modes.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);

        let ages = top_n_distribution(&games, 2, DistributionGroup::AgeRatings);
        let total: f64 = ages.iter().map(|s| s.percent).sum();
        assert!(total <= 100.0);
        assert_eq!(ages.iter().find(|s| s.label == "Teen").unwrap().percent, 50.0);

        assert!(top_n_distribution(&games, 0, DistributionGroup::GameModes).is_empty());
    }

    #[test]
    fn explode_and_category_counts() {
        let mut a = game("a", 2005, 70.0);
        a.genres = strings(&["Adventure", "Indie"]);
        let mut b = game("b", 2005, 70.0);
        b.genres = strings(&["Adventure"]);
        b.game_type = "Remake".to_string();
        let games = vec![a, b];

        assert_eq!(
            category_counts(&games, Category::Genres),
            vec![
                LabelCount { label: "Adventure".to_string(), count: 2 },
                LabelCount { label: "Indie".to_string(), count: 1 },
            ]
        );
        assert_eq!(
            explode_counts_in_year(&games, |g| g.genres.as_slice(), 2005),
            category_counts(&games, Category::Genres)
        );
        assert!(explode_counts_in_year(&games, |g| g.genres.as_slice(), 2006).is_empty());
        let types = category_counts(&games, Category::GameType);
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].label, "Main Game");
    }

    #[test]
    fn country_counts_keep_unresolved_names() {
        let mut a = game("a", 2001, 70.0);
        a.developers = vec![
            Company::new("Studio A", Some("Japan")),
            Company::new("Studio B", Some("Atlantis")),
            Company::new("Studio C", None),
        ];
        a.publishers = vec![Company::new("Pub", Some("Japan"))];
        let mut b = game("b", 2002, 70.0);
        b.developers = vec![Company::new("Studio D", Some("Japan"))];
        let games = vec![a, b];

        let overall = country_counts(&games, false, &IsoCountries);
        assert_eq!(overall.len(), 2);
        let japan = overall.iter().find(|c| c.country == "Japan").unwrap();
        assert_eq!((japan.developer, japan.publisher, japan.total()), (2, 1, 3));
        assert_eq!(japan.alpha3, Some("JPN"));
        let atlantis = overall.iter().find(|c| c.country == "Atlantis").unwrap();
        assert_eq!(atlantis.alpha3, None);
        assert_eq!(atlantis.developer, 1);

        let yearly = country_counts(&games, true, &IsoCountries);
        assert_eq!(yearly.first().unwrap().year, Some(2001));
        assert_eq!(yearly.last().unwrap().year, Some(2002));
    }

    #[test]
    fn bands_follow_inclusive_upper_bounds() {
        assert_eq!(RatingBand::of(60.0), RatingBand::Below60);
        assert_eq!(RatingBand::of(60.5), RatingBand::From60);
        assert_eq!(RatingBand::of(90.0), RatingBand::From75);
        assert_eq!(RatingBand::of(90.1), RatingBand::From90);
        assert_eq!(DlcBand::of(0), DlcBand::Zero);
        assert_eq!(DlcBand::of(5), DlcBand::TwoToFive);
        assert_eq!(DlcBand::of(20), DlcBand::ElevenToTwenty);
        assert_eq!(DlcBand::of(21), DlcBand::MoreThanTwenty);

        let mut g = game("g", 2010, 80.0);
        g.remaster = true;
        g.early_access = true;
        assert_eq!(SpecialType::of(&g), SpecialType::Remaster);

        let paths = parallel_paths([&g, &g, &game("h", 2010, 50.0)]);
        assert_eq!(paths[0].1, 2);
        assert_eq!(paths[0].0.rating, RatingBand::From75);
    }

    #[test]
    fn top_rated_and_kpis() {
        let mut games = vec![
            rated(2003, 71.234, false),
            rated(2009, 88.0, false),
            rated(2001, 55.0, false),
        ];
        games[1].has_reliable_votes = false;

        let top = top_rated(&games, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].rating, 88.0);
        assert_eq!(top[1].rating, 71.23);

        let k = kpis(&games);
        assert_eq!(k.total, 3);
        assert_eq!(k.reliable, 2);
        assert_eq!(k.average_reliable_rating, Some(63.12));
        assert_eq!((k.first_year, k.last_year), (Some(2001), Some(2009)));
        assert_eq!(igdb_baseline().len(), 26);
    }
}
