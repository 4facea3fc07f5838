use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const DEFAULT_OUTPUT: &str = "sample_games.csv";
const DEFAULT_ROWS: usize = 2000;
const SEED: u64 = 42;

const PLACEHOLDER_COVER: &str = "https://i.imgur.com/VsWBrKg.jpeg";

const TITLE_FIRST: [&str; 12] = [
    "Crimson", "Silent", "Hollow", "Neon", "Iron", "Lost", "Starlit", "Broken", "Emerald",
    "Frozen", "Wild", "Last",
];
const TITLE_SECOND: [&str; 12] = [
    "Kingdom", "Frontier", "Echoes", "Circuit", "Harbor", "Legends", "Odyssey", "Garden",
    "Protocol", "Drift", "Requiem", "Tactics",
];

/// (company, country); "Unknown" companies have no country on record.
const COMPANIES: [(&str, &str); 14] = [
    ("Nintendo EPD", "Japan"),
    ("Capcom", "Japan"),
    ("Square Enix", "Japan"),
    ("Ubisoft Montreal", "Canada"),
    ("Electronic Arts", "United States"),
    ("Bethesda Softworks", "United States"),
    ("CD Projekt Red", "Poland"),
    ("Remedy Entertainment", "Finland"),
    ("Supergiant Games", "United States"),
    ("Team Cherry", "Australia"),
    ("Paradox Interactive", "Sweden"),
    ("Quantic Dream", "France"),
    ("Rare", "United Kingdom"),
    ("Devolver Digital", "Unknown"),
];

/// (platform, family, platform type, generation)
const PLATFORMS: [(&str, &str, &str, i64); 14] = [
    ("Nintendo Switch", "Nintendo", "console", 9),
    ("Wii U", "Nintendo", "console", 8),
    ("Nintendo 3DS", "Nintendo", "portable_console", 8),
    ("Wii", "Nintendo", "console", 7),
    ("PlayStation 5", "PlayStation", "console", 9),
    ("PlayStation 4", "PlayStation", "console", 8),
    ("PlayStation 3", "PlayStation", "console", 7),
    ("PlayStation Vita", "PlayStation", "portable_console", 8),
    ("Xbox Series X|S", "Xbox", "console", 9),
    ("Xbox One", "Xbox", "console", 8),
    ("Xbox 360", "Xbox", "console", 7),
    ("PC (Microsoft Windows)", "Windows", "operating_system", 0),
    ("Mac", "Apple", "operating_system", 0),
    ("Linux", "Linux", "operating_system", 0),
];

const GENRES: [&str; 12] = [
    "Adventure", "Indie", "Role-playing (RPG)", "Shooter", "Platform", "Puzzle", "Strategy",
    "Racing", "Simulator", "Fighting", "Sport", "Arcade",
];
const MODES: [&str; 4] = ["Single player", "Multiplayer", "Co-operative", "Split screen"];
const PERSPECTIVES: [&str; 4] = ["First person", "Third person", "Side view", "Bird view / Isometric"];
const GAME_TYPES: [&str; 4] = ["Main Game", "Main Game", "Remake", "Remaster"];
const AGE_RATINGS: [&str; 5] = ["Everyone", "Child", "Teen", "Young", "18+"];

const COLUMNS: [&str; 23] = [
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

struct SampleGame {
    name: String,
    date: String,
    cover: String,
    rating: f64,
    developers: Vec<String>,
    developer_countries: Vec<String>,
    publishers: Vec<String>,
    publisher_countries: Vec<String>,
    platforms: Vec<String>,
    families: Vec<String>,
    platform_types: Vec<String>,
    generation: i64,
    game_type: String,
    modes: Vec<String>,
    perspectives: Vec<String>,
    genres: Vec<String>,
    remake: bool,
    remaster: bool,
    early_access: bool,
    dlcs: i64,
    age_rating: String,
    reliable: bool,
    collection: bool,
}

fn pick_some<'a>(rng: &mut StdRng, pool: &[&'a str], max: usize) -> Vec<&'a str> {
    let n = rng.gen_range(1..=max.min(pool.len()));
    let mut picked: Vec<&str> = pool.choose_multiple(rng, n).copied().collect();
    picked.sort_unstable();
    picked.dedup();
    picked
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Companies and their countries; an "Unknown" country leaves the list empty.
fn companies(rng: &mut StdRng) -> (Vec<String>, Vec<String>) {
    let n = if rng.gen_bool(0.8) { 1 } else { 2 };
    let picked: Vec<&(&str, &str)> = COMPANIES.choose_multiple(rng, n).collect();
    let names = picked.iter().map(|(name, _)| name.to_string()).collect();
    let countries = picked
        .iter()
        .filter(|(_, country)| *country != "Unknown")
        .map(|(_, country)| country.to_string())
        .collect();
    (names, countries)
}

fn sample_game(rng: &mut StdRng, id: usize) -> SampleGame {
    let year = rng.gen_range(2000..=2025);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);

    // three uniforms give a bell shape around 70
    let spread: f64 = (0..3).map(|_| rng.gen_range(-12.0_f64..12.0)).sum();
    let rating = (70.0 + spread).clamp(15.0, 99.0);

    let n_platforms = rng.gen_range(1..=4);
    let mut platforms: Vec<&(&str, &str, &str, i64)> =
        PLATFORMS.choose_multiple(rng, n_platforms).collect();
    platforms.sort_by_key(|p| p.0);

    let mut genres = pick_some(rng, &GENRES, 3);
    if rng.gen_bool(0.3) && !genres.contains(&"Indie") {
        genres.push("Indie");
    }
    let game_type = GAME_TYPES.choose(rng).copied().unwrap_or("Main Game");
    let main_game = game_type == "Main Game";
    let (developers, developer_countries) = companies(rng);
    let (publishers, publisher_countries) = companies(rng);

    SampleGame {
        name: format!(
            "{} {} {}",
            TITLE_FIRST.choose(rng).copied().unwrap_or("Untitled"),
            TITLE_SECOND.choose(rng).copied().unwrap_or("Game"),
            id
        ),
        date: format!("{year}-{month:02}-{day:02}"),
        cover: if rng.gen_bool(0.05) {
            PLACEHOLDER_COVER.to_string()
        } else {
            format!("//images.igdb.com/igdb/image/upload/t_cover_big/co{id:x}.jpg")
        },
        rating: (rating * 100.0).round() / 100.0,
        developers,
        developer_countries,
        publishers,
        publisher_countries,
        platforms: platforms.iter().map(|p| p.0.to_string()).collect(),
        families: platforms.iter().map(|p| p.1.to_string()).collect(),
        platform_types: platforms.iter().map(|p| p.2.to_string()).collect(),
        generation: platforms.iter().map(|p| p.3).max().unwrap_or(0),
        game_type: game_type.to_string(),
        modes: strings(&pick_some(rng, &MODES, 2)),
        perspectives: strings(&pick_some(rng, &PERSPECTIVES, 2)),
        genres: strings(&genres),
        remake: main_game && rng.gen_bool(0.05),
        remaster: main_game && rng.gen_bool(0.05),
        early_access: rng.gen_bool(0.03),
        dlcs: if rng.gen_bool(0.7) { 0 } else { rng.gen_range(1..=30) },
        age_rating: AGE_RATINGS.choose(rng).copied().unwrap_or("Everyone").to_string(),
        reliable: rng.gen_bool(0.25),
        collection: rng.gen_bool(0.4),
    }
}

/// The same seed always yields the same table.
fn sample_games(rows: usize) -> Vec<SampleGame> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..rows).map(|id| sample_game(&mut rng, id)).collect()
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Python-style list literal, e.g. `['Action', 'Indie']`.
fn list_literal(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn flag(b: bool) -> String {
    if b { "True" } else { "False" }.to_string()
}

fn write_csv(path: &Path, games: &[SampleGame]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(COLUMNS)?;
    for g in games {
        let country_cell = |countries: &[String], companies: &[String]| {
            if countries.is_empty() && !companies.is_empty() {
                "Unknown".to_string()
            } else {
                list_literal(countries)
            }
        };
        writer.write_record([
            g.name.clone(),
            g.date.clone(),
            g.cover.clone(),
            g.rating.to_string(),
            list_literal(&g.developers),
            country_cell(&g.developer_countries, &g.developers),
            list_literal(&g.publishers),
            country_cell(&g.publisher_countries, &g.publishers),
            list_literal(&g.platforms),
            list_literal(&g.families),
            list_literal(&g.platform_types),
            g.generation.to_string(),
            g.game_type.clone(),
            list_literal(&g.modes),
            list_literal(&g.perspectives),
            list_literal(&g.genres),
            flag(g.remake),
            flag(g.remaster),
            flag(g.early_access),
            g.dlcs.to_string(),
            g.age_rating.clone(),
            flag(g.reliable),
            flag(g.collection),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn list_array(games: &[SampleGame], items: impl Fn(&SampleGame) -> &[String]) -> ArrayRef {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for g in games {
        for item in items(g) {
            builder.values().append_value(item);
        }
        builder.append(true);
    }
    Arc::new(builder.finish())
}

fn text_array(games: &[SampleGame], text: impl Fn(&SampleGame) -> &str) -> ArrayRef {
    Arc::new(StringArray::from(games.iter().map(text).collect::<Vec<_>>()))
}

fn bool_array(games: &[SampleGame], flag: impl Fn(&SampleGame) -> bool) -> ArrayRef {
    Arc::new(BooleanArray::from(games.iter().map(flag).collect::<Vec<_>>()))
}

fn write_parquet(path: &Path, games: &[SampleGame]) -> Result<()> {
    let columns: Vec<ArrayRef> = vec![
        text_array(games, |g| g.name.as_str()),
        text_array(games, |g| g.date.as_str()),
        text_array(games, |g| g.cover.as_str()),
        Arc::new(Float64Array::from(games.iter().map(|g| g.rating).collect::<Vec<_>>())),
        list_array(games, |g| g.developers.as_slice()),
        list_array(games, |g| g.developer_countries.as_slice()),
        list_array(games, |g| g.publishers.as_slice()),
        list_array(games, |g| g.publisher_countries.as_slice()),
        list_array(games, |g| g.platforms.as_slice()),
        list_array(games, |g| g.families.as_slice()),
        list_array(games, |g| g.platform_types.as_slice()),
        Arc::new(Int64Array::from(games.iter().map(|g| g.generation).collect::<Vec<_>>())),
        text_array(games, |g| g.game_type.as_str()),
        list_array(games, |g| g.modes.as_slice()),
        list_array(games, |g| g.perspectives.as_slice()),
        list_array(games, |g| g.genres.as_slice()),
        bool_array(games, |g| g.remake),
        bool_array(games, |g| g.remaster),
        bool_array(games, |g| g.early_access),
        Arc::new(Int64Array::from(games.iter().map(|g| g.dlcs).collect::<Vec<_>>())),
        text_array(games, |g| g.age_rating.as_str()),
        bool_array(games, |g| g.reliable),
        bool_array(games, |g| g.collection),
    ];
    let fields: Vec<Field> = COLUMNS
        .iter()
        .zip(&columns)
        .map(|(name, col)| Field::new(*name, col.data_type().clone(), false))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// `generate_sample [OUT.csv|OUT.parquet] [ROWS]`
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let rows = match args.next() {
        Some(n) => n.parse::<usize>().with_context(|| format!("invalid row count '{n}'"))?,
        None => DEFAULT_ROWS,
    };

    let games = sample_games(rows);

    let path = Path::new(&output);
    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "parquet" | "pq"));
    if is_parquet {
        write_parquet(path, &games)?;
    } else {
        write_csv(path, &games)?;
    }

    println!("Wrote {} games to {output}", games.len());
    Ok(())
}
