use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::literal::{format_list, parse_list};
use super::model::{Company, Game, GameTable, COLUMNS};
use super::quality;

/// How many rejected rows are kept verbatim in the report.
const MAX_REJECTED_EXAMPLES: usize = 20;

// ---------------------------------------------------------------------------
// Ingestion outcome
// ---------------------------------------------------------------------------

/// A row that could not become a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("line {line}: missing required '{column}'")]
    Missing { line: usize, column: &'static str },
    #[error("line {line}: '{column}' has invalid value '{value}'")]
    Invalid {
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: unreadable record ({reason})")]
    Unreadable { line: usize, reason: String },
}

/// What ingestion had to coerce or drop.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub rows_read: usize,
    pub rejected: usize,
    pub rejected_examples: Vec<RowError>,
    /// Empty / NaN cells per column.
    pub missing: BTreeMap<&'static str, usize>,
    /// List-literal cells that failed to parse and were read as `[]`.
    pub malformed_lists: BTreeMap<&'static str, usize>,
    /// Rows whose company and country lists have different lengths.
    pub misaligned_companies: usize,
    /// Rows whose `platforms` and `platform_family` lengths differ.
    pub platform_mismatches: usize,
    pub duplicate_rows: usize,
}

impl IngestReport {
    fn reject(&mut self, err: RowError) {
        log::warn!("Skipping row: {err}");
        self.rejected += 1;
        if self.rejected_examples.len() < MAX_REJECTED_EXAMPLES {
            self.rejected_examples.push(err);
        }
    }

    pub fn malformed_total(&self) -> usize {
        self.malformed_lists.values().sum()
    }
}

/// The table together with its ingestion report.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub table: GameTable,
    pub report: IngestReport,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the games table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the cleaned export, list columns as literals (`['Action', 'Indie']`)
/// * `.parquet` – same column names; list columns as literals or native lists
pub fn load_file(path: &Path) -> Result<LoadedDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Write games back out in the same CSV layout the loader reads.
pub fn export_csv<'a>(path: &Path, games: impl IntoIterator<Item = &'a Game>) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(COLUMNS).context("writing CSV header")?;

    let mut written = 0;
    for game in games {
        writer
            .write_record(game_to_record(game))
            .with_context(|| format!("writing '{}'", game.name))?;
        written += 1;
    }
    writer.flush().context("flushing CSV")?;
    Ok(written)
}

// ---------------------------------------------------------------------------
// Row access shared by both formats
// ---------------------------------------------------------------------------

enum Cell<'a> {
    Missing,
    Text(&'a str),
    List(&'a [String]),
}

trait RowCells {
    fn cell(&self, column: &str) -> Cell<'_>;
}

fn is_missing(s: &str) -> bool {
    matches!(s.trim(), "" | "nan" | "NaN" | "None" | "<NA>" | "NaT")
}

/// Accumulates games and the report while rows stream in.
#[derive(Default)]
struct Ingest {
    games: Vec<Game>,
    report: IngestReport,
}

impl Ingest {
    fn push(&mut self, row: &impl RowCells, line: usize) {
        self.report.rows_read += 1;
        for column in COLUMNS {
            if matches!(row.cell(column), Cell::Missing) {
                *self.report.missing.entry(column).or_default() += 1;
            }
        }
        match self.game_from_row(row, line) {
            Ok(game) => {
                if !game.platforms_consistent() {
                    self.report.platform_mismatches += 1;
                }
                self.games.push(game);
            }
            Err(err) => self.report.reject(err),
        }
    }

    /// A record that could not be split into cells at all.
    fn skip(&mut self, line: usize, reason: String) {
        self.report.rows_read += 1;
        self.report.reject(RowError::Unreadable { line, reason });
    }

    fn finish(mut self) -> LoadedDataset {
        self.report.duplicate_rows = quality::duplicate_rows(&self.games);

        let report = &self.report;
        if report.malformed_total() > 0 {
            log::warn!(
                "{} malformed list cells read as empty lists: {:?}",
                report.malformed_total(),
                report.malformed_lists
            );
        }
        if report.misaligned_companies > 0 {
            log::warn!(
                "{} rows have company and country lists of different lengths",
                report.misaligned_companies
            );
        }
        if report.platform_mismatches > 0 {
            log::warn!(
                "{} rows have platforms and platform families of different lengths",
                report.platform_mismatches
            );
        }
        log::info!(
            "Ingested {} of {} rows ({} rejected)",
            self.games.len(),
            report.rows_read,
            report.rejected
        );

        LoadedDataset {
            table: GameTable::new(self.games),
            report: self.report,
        }
    }

    fn game_from_row(&mut self, row: &impl RowCells, line: usize) -> Result<Game, RowError> {
        let name = required_text(row, line, "name")?.to_string();
        let first_release_date = parse_date(required_text(row, line, "first_release_date")?)
            .ok_or_else(|| invalid(row, line, "first_release_date"))?;
        let total_rating = required_text(row, line, "total_rating")?
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(row, line, "total_rating"))?;

        let developers = self.companies(row, "developer_company", "developer_country");
        let publishers = self.companies(row, "publisher_company", "publisher_country");

        Ok(Game {
            name,
            first_release_date,
            cover: optional_text(row, "cover").map(str::to_string),
            total_rating,
            developers,
            publishers,
            platforms: self.list(row, "platforms"),
            platform_families: self.list(row, "platform_family"),
            platform_types: self.list(row, "platform_type"),
            generation: integer(row, line, "generation_platform")?,
            game_type: optional_text(row, "game_type").unwrap_or_default().to_string(),
            game_modes: self.list(row, "game_modes"),
            player_perspectives: self.list(row, "player_perspectives"),
            genres: self.list(row, "genres"),
            remake: boolean(row, line, "remake")?,
            remaster: boolean(row, line, "remaster")?,
            early_access: boolean(row, line, "early_access")?,
            dlcs: integer(row, line, "dlcs")?,
            age_rating: optional_text(row, "age_rattings").unwrap_or_default().to_string(),
            has_reliable_votes: boolean(row, line, "has_reliable_votes")?,
            has_collections: boolean(row, line, "has_collections")?,
        })
    }

    /// A list column; malformed literals fail closed to `[]` and are counted.
    fn list(&mut self, row: &impl RowCells, column: &'static str) -> Vec<String> {
        match row.cell(column) {
            Cell::Missing => Vec::new(),
            Cell::List(items) => items.to_vec(),
            Cell::Text(text) => match parse_list(text) {
                Ok(items) => items,
                Err(err) => {
                    log::debug!("Malformed '{column}' literal {text:?}: {err}");
                    *self.report.malformed_lists.entry(column).or_default() += 1;
                    Vec::new()
                }
            },
        }
    }

    fn companies(
        &mut self,
        row: &impl RowCells,
        names_column: &'static str,
        countries_column: &'static str,
    ) -> Vec<Company> {
        let names = self.list(row, names_column);
        let countries = match row.cell(countries_column) {
            Cell::Text(text) if text.trim() == "Unknown" => Vec::new(),
            _ => self.list(row, countries_column),
        };
        if names.len() != countries.len() {
            self.report.misaligned_companies += 1;
        }
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Company::new(name, countries.get(i).map(String::as_str)))
            .collect()
    }
}

fn optional_text<'a>(row: &'a impl RowCells, column: &'static str) -> Option<&'a str> {
    match row.cell(column) {
        Cell::Text(text) => Some(text.trim()),
        _ => None,
    }
}

fn required_text<'a>(
    row: &'a impl RowCells,
    line: usize,
    column: &'static str,
) -> Result<&'a str, RowError> {
    optional_text(row, column).ok_or(RowError::Missing { line, column })
}

fn invalid(row: &impl RowCells, line: usize, column: &'static str) -> RowError {
    RowError::Invalid {
        line,
        column,
        value: optional_text(row, column).unwrap_or_default().to_string(),
    }
}

fn integer(row: &impl RowCells, line: usize, column: &'static str) -> Result<i64, RowError> {
    let Some(text) = optional_text(row, column) else {
        return Ok(0);
    };
    if let Ok(i) = text.parse::<i64>() {
        return Ok(i);
    }
    // pandas writes nullable ints as floats ("8.0")
    match text.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 => Ok(f as i64),
        _ => Err(invalid(row, line, column)),
    }
}

fn boolean(row: &impl RowCells, line: usize, column: &'static str) -> Result<bool, RowError> {
    match optional_text(row, column) {
        None => Ok(false),
        Some("True" | "true" | "TRUE" | "1" | "1.0") => Ok(true),
        Some("False" | "false" | "FALSE" | "0" | "0.0") => Ok(false),
        Some(_) => Err(invalid(row, line, column)),
    }
}

/// Accepts `2017-03-03`, `2017-03-03 00:00:00` and `2017-03-03T00:00:00`.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let day = text.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn game_to_record(game: &Game) -> Vec<String> {
    let names = |companies: &[Company]| {
        format_list(&companies.iter().map(|c| c.name.clone()).collect::<Vec<_>>())
    };
    let countries = |companies: &[Company]| {
        format_list(&companies.iter().filter_map(|c| c.country.clone()).collect::<Vec<_>>())
    };
    let flag = |b: bool| if b { "True" } else { "False" }.to_string();

    vec![
        game.name.clone(),
        game.first_release_date.format("%Y-%m-%d").to_string(),
        game.cover.clone().unwrap_or_default(),
        game.total_rating.to_string(),
        names(&game.developers),
        countries(&game.developers),
        names(&game.publishers),
        countries(&game.publishers),
        format_list(&game.platforms),
        format_list(&game.platform_families),
        format_list(&game.platform_types),
        game.generation.to_string(),
        game.game_type.clone(),
        format_list(&game.game_modes),
        format_list(&game.player_perspectives),
        format_list(&game.genres),
        flag(game.remake),
        flag(game.remaster),
        flag(game.early_access),
        game.dlcs.to_string(),
        game.age_rating.clone(),
        flag(game.has_reliable_votes),
        flag(game.has_collections),
    ]
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

struct CsvRow<'r> {
    index: &'r BTreeMap<&'static str, usize>,
    record: &'r csv::StringRecord,
}

impl RowCells for CsvRow<'_> {
    fn cell(&self, column: &str) -> Cell<'_> {
        match self.index.get(column).and_then(|&i| self.record.get(i)) {
            Some(text) if !is_missing(text) => Cell::Text(text),
            _ => Cell::Missing,
        }
    }
}

fn load_csv(path: &Path) -> Result<LoadedDataset> {
    // Ragged rows are rejected one by one instead of failing the load.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut index = BTreeMap::new();
    for column in COLUMNS {
        let position = headers
            .iter()
            .position(|h| h == column)
            .with_context(|| format!("CSV missing '{column}' column"))?;
        index.insert(column, position);
    }

    let mut ingest = Ingest::default();
    for (row_no, result) in reader.records().enumerate() {
        // header is line 1
        let line = row_no + 2;
        let record = match result {
            Ok(record) if record.len() == headers.len() => record,
            Ok(record) => {
                ingest.skip(
                    line,
                    format!("expected {} fields, found {}", headers.len(), record.len()),
                );
                continue;
            }
            Err(err) => {
                ingest.skip(line, err.to_string());
                continue;
            }
        };
        ingest.push(
            &CsvRow {
                index: &index,
                record: &record,
            },
            line,
        );
    }

    Ok(ingest.finish())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

enum OwnedCell {
    Missing,
    Text(String),
    List(Vec<String>),
}

struct ParquetRow {
    cells: BTreeMap<&'static str, OwnedCell>,
}

impl RowCells for ParquetRow {
    fn cell(&self, column: &str) -> Cell<'_> {
        match self.cells.get(column) {
            Some(OwnedCell::Text(text)) if !is_missing(text) => Cell::Text(text),
            Some(OwnedCell::List(items)) => Cell::List(items),
            _ => Cell::Missing,
        }
    }
}

/// Load a Parquet file with the same column names as the CSV.
///
/// Scalar columns may be any Arrow type with a textual rendering; list columns
/// may be `Utf8` literals or `List<Utf8>` / `LargeList<Utf8>`.
fn load_parquet(path: &Path) -> Result<LoadedDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut ingest = Ingest::default();
    let mut line = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let columns = COLUMNS
            .iter()
            .map(|&name| {
                let idx = schema
                    .index_of(name)
                    .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
                Ok((name, batch.column(idx).clone()))
            })
            .collect::<Result<Vec<(&'static str, ArrayRef)>>>()?;

        for row in 0..batch.num_rows() {
            line += 1;
            let cells = columns
                .iter()
                .map(|(name, col)| {
                    let cell = arrow_cell(col, row)
                        .with_context(|| format!("Row {line}: failed to read '{name}'"))?;
                    Ok((*name, cell))
                })
                .collect::<Result<BTreeMap<_, _>>>()?;
            ingest.push(&ParquetRow { cells }, line);
        }
    }

    Ok(ingest.finish())
}

fn arrow_cell(col: &ArrayRef, row: usize) -> Result<OwnedCell> {
    if col.is_null(row) {
        return Ok(OwnedCell::Missing);
    }
    let values = match col.data_type() {
        DataType::List(_) => col.as_list::<i32>().value(row),
        DataType::LargeList(_) => col.as_list::<i64>().value(row),
        _ => return Ok(OwnedCell::Text(array_value_to_string(col.as_ref(), row)?)),
    };
    let strings = cast(&values, &DataType::Utf8).context("casting list items to text")?;
    let items = strings
        .as_string::<i32>()
        .iter()
        .flatten()
        .map(str::to_string)
        .collect();
    Ok(OwnedCell::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{
        BooleanArray, Date32Array, Float64Array, Int64Array, LargeListBuilder, ListBuilder,
        StringArray, StringBuilder,
    };
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    const HEADER: [&str; 23] = COLUMNS;

    fn row(name: &str) -> Vec<String> {
        vec![
            name,
            "2017-03-03 00:00:00",
            "//images.igdb.com/cover.jpg",
            "97.5",
            "['Nintendo EPD', 'Monolith Soft']",
            "['Japan', 'Japan']",
            "['Nintendo']",
            "['Japan']",
            "['Nintendo Switch', 'Wii U']",
            "['Nintendo', 'Nintendo']",
            "['Console', 'Console']",
            "9.0",
            "Main Game",
            "['Single player']",
            "['Third person']",
            "['Adventure', 'Role-playing (RPG)']",
            "False",
            "False",
            "False",
            "2",
            "Everyone",
            "True",
            "True",
        ]
        .into_iter()
        .map(str::to_string)
        .collect()
    }

    fn write_csv(rows: &[Vec<String>]) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let mut writer = csv::Writer::from_path(file.path()).unwrap();
        writer.write_record(HEADER).unwrap();
        for r in rows {
            writer.write_record(r).unwrap();
        }
        writer.flush().unwrap();
        file
    }

    fn column(name: &str) -> usize {
        COLUMNS.iter().position(|c| *c == name).unwrap()
    }

    #[test]
    fn loads_a_clean_row() {
        let file = write_csv(&[row("Zelda: Breath of the Wild")]);
        let loaded = load_file(file.path()).unwrap();

        assert_eq!(loaded.table.len(), 1);
        let game = &loaded.table.games[0];
        assert_eq!(game.year(), 2017);
        assert_eq!(game.total_rating, 97.5);
        assert_eq!(game.generation, 9);
        assert_eq!(game.dlcs, 2);
        assert_eq!(game.developers[1], Company::new("Monolith Soft", Some("Japan")));
        assert_eq!(game.genres, vec!["Adventure", "Role-playing (RPG)"]);
        assert!(game.has_reliable_votes && game.has_collections && !game.remake);
        assert_eq!(loaded.report.rejected, 0);
        assert_eq!(loaded.report.malformed_total(), 0);
    }

    #[test]
    fn malformed_lists_fail_closed_and_are_reported() {
        let mut bad = row("Broken");
        bad[column("genres")] = "['Adventure'".to_string();
        bad[column("developer_country")] = "Unknown".to_string();
        let file = write_csv(&[bad]);

        let loaded = load_file(file.path()).unwrap();
        let game = &loaded.table.games[0];
        assert!(game.genres.is_empty());
        assert_eq!(loaded.report.malformed_lists.get("genres"), Some(&1));
        // "Unknown" is a known placeholder, not a malformed cell
        assert_eq!(loaded.report.malformed_lists.get("developer_country"), None);
        assert_eq!(game.developers[0].country, None);
        assert_eq!(loaded.report.misaligned_companies, 1);
    }

    #[test]
    fn rows_without_required_fields_are_rejected() {
        let mut no_date = row("No Date");
        no_date[column("first_release_date")] = String::new();
        let mut bad_rating = row("Bad Rating");
        bad_rating[column("total_rating")] = "great".to_string();
        let file = write_csv(&[no_date, bad_rating, row("Fine")]);

        let loaded = load_file(file.path()).unwrap();
        assert_eq!(loaded.table.len(), 1);
        assert_eq!(loaded.report.rows_read, 3);
        assert_eq!(loaded.report.rejected, 2);
        assert_eq!(
            loaded.report.rejected_examples[0],
            RowError::Missing {
                line: 2,
                column: "first_release_date"
            }
        );
        assert_eq!(loaded.report.missing.get("first_release_date"), Some(&1));
    }

    #[test]
    fn platform_family_mismatch_is_flagged() {
        let mut r = row("Mismatch");
        r[column("platform_family")] = "['Nintendo']".to_string();
        let file = write_csv(&[r]);
        let loaded = load_file(file.path()).unwrap();
        assert_eq!(loaded.report.platform_mismatches, 1);
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::fs::write(file.path(), "name,total_rating\nHalo,90\n").unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("first_release_date"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("games.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn export_reads_back_identically() {
        let mut second = row("Metroid Dread");
        second[column("publisher_country")] = "[]".to_string();
        let file = write_csv(&[row("Zelda"), second]);
        let loaded = load_file(file.path()).unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        let out = out_dir.path().join("export.csv");
        let written = export_csv(&out, &loaded.table.games).unwrap();
        assert_eq!(written, 2);

        let reloaded = load_file(&out).unwrap();
        assert_eq!(reloaded.table.games, loaded.table.games);
    }

    #[test]
    fn ragged_and_undecodable_records_are_rejected_individually() {
        let mut bytes = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut bytes);
            writer.write_record(HEADER).unwrap();
            writer.write_record(row("First")).unwrap();
            writer.flush().unwrap();
        }
        bytes.extend_from_slice(b"Short,2020-01-01,,80\n");

        let mut latin1 = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut latin1);
            writer.write_record(row("Pok?mon")).unwrap();
            writer.flush().unwrap();
        }
        if let Some(pos) = latin1.iter().position(|&b| b == b'?') {
            latin1[pos] = 0xE9;
        }
        bytes.extend_from_slice(&latin1);

        {
            let mut writer = csv::Writer::from_writer(&mut bytes);
            writer.write_record(row("Last")).unwrap();
            writer.flush().unwrap();
        }
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        std::fs::write(file.path(), &bytes).unwrap();

        let loaded = load_file(file.path()).unwrap();
        let names: Vec<&str> = loaded.table.games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Last"]);
        assert_eq!(loaded.report.rows_read, 4);
        assert_eq!(loaded.report.rejected, 2);
        assert_eq!(
            loaded.report.rejected_examples[0],
            RowError::Unreadable {
                line: 3,
                reason: "expected 23 fields, found 4".to_string()
            }
        );
        assert!(matches!(
            loaded.report.rejected_examples[1],
            RowError::Unreadable { line: 4, .. }
        ));
    }

    // -- Parquet ------------------------------------------------------------

    fn text(values: [Option<&str>; 3]) -> ArrayRef {
        Arc::new(StringArray::from(values.to_vec()))
    }

    fn flags(values: [bool; 3]) -> ArrayRef {
        Arc::new(BooleanArray::from(values.to_vec()))
    }

    fn list(values: [Option<&[&str]>; 3]) -> ArrayRef {
        let mut builder = ListBuilder::new(StringBuilder::new());
        for value in values {
            for item in value.unwrap_or_default() {
                builder.values().append_value(item);
            }
            builder.append(value.is_some());
        }
        Arc::new(builder.finish())
    }

    fn large_list(values: [&[&str]; 3]) -> ArrayRef {
        let mut builder = LargeListBuilder::new(StringBuilder::new());
        for value in values {
            for item in value {
                builder.values().append_value(item);
            }
            builder.append(true);
        }
        Arc::new(builder.finish())
    }

    fn dates(values: [(i32, u32, u32); 3]) -> ArrayRef {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let days: Vec<i32> = values
            .iter()
            .map(|&(y, m, d)| {
                let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
                date.signed_duration_since(epoch).num_days() as i32
            })
            .collect();
        Arc::new(Date32Array::from(days))
    }

    fn floats(values: [f64; 3]) -> ArrayRef {
        Arc::new(Float64Array::from(values.to_vec()))
    }

    fn ints(values: [Option<i64>; 3]) -> ArrayRef {
        Arc::new(Int64Array::from(values.to_vec()))
    }

    fn write_parquet(columns: Vec<(&str, ArrayRef)>) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, col)| Field::new(*name, col.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        let arrays = columns.into_iter().map(|(_, col)| col).collect();
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    /// Zelda (clean), a row without a name, Hades (assorted defects).
    fn parquet_columns() -> Vec<(&'static str, ArrayRef)> {
        vec![
            ("name", text([Some("Zelda"), None, Some("Hades")])),
            (
                "first_release_date",
                dates([(2017, 3, 3), (2019, 1, 1), (2020, 9, 17)]),
            ),
            ("cover", text([None, None, Some("//images.igdb.com/co1.jpg")])),
            ("total_rating", floats([97.5, 50.0, 93.0])),
            (
                "developer_company",
                text([Some("['Nintendo EPD']"), None, Some("['Supergiant Games']")]),
            ),
            ("developer_country", text([Some("['Japan']"), None, Some("Unknown")])),
            ("publisher_company", list([Some(&["Nintendo"]), Some(&[]), Some(&["Supergiant Games"])])),
            ("publisher_country", list([Some(&["Japan"]), Some(&[]), Some(&["United States"])])),
            (
                "platforms",
                large_list([&["Nintendo Switch"], &[], &["Nintendo Switch", "PC (Microsoft Windows)"]]),
            ),
            ("platform_family", list([Some(&["Nintendo"]), Some(&[]), Some(&["Nintendo"])])),
            ("platform_type", list([Some(&["Console"]), None, Some(&["Console", "Computer"])])),
            ("generation_platform", ints([Some(9), None, Some(9)])),
            ("game_type", text([Some("Main Game"); 3])),
            ("game_modes", text([Some("['Single player']"), None, Some("['Single player'")])),
            ("player_perspectives", list([Some(&["Third person"]), None, Some(&["Bird view / Isometric"])])),
            ("genres", list([Some(&["Adventure"]), Some(&[]), Some(&["Indie", "Action"])])),
            ("remake", flags([false; 3])),
            ("remaster", flags([false; 3])),
            ("early_access", flags([false; 3])),
            ("dlcs", ints([Some(2), Some(0), Some(0)])),
            ("age_rattings", text([Some("Everyone"), None, Some("Teen")])),
            ("has_reliable_votes", flags([true, false, true])),
            ("has_collections", flags([true, false, false])),
        ]
    }

    #[test]
    fn loads_native_lists_literals_and_nulls_from_parquet() {
        let file = write_parquet(parquet_columns());
        let loaded = load_file(file.path()).unwrap();
        let report = &loaded.report;

        assert_eq!(loaded.table.len(), 2);
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rejected, 1);
        assert_eq!(
            report.rejected_examples[0],
            RowError::Missing {
                line: 2,
                column: "name"
            }
        );
        assert_eq!(report.missing.get("cover"), Some(&2));
        assert_eq!(report.malformed_lists.get("game_modes"), Some(&1));
        assert_eq!(report.platform_mismatches, 1);
        assert_eq!(report.misaligned_companies, 1);

        let zelda = &loaded.table.games[0];
        assert_eq!(zelda.name, "Zelda");
        assert_eq!(zelda.year(), 2017);
        assert_eq!(zelda.cover, None);
        assert_eq!(zelda.total_rating, 97.5);
        assert_eq!(zelda.generation, 9);
        assert_eq!(zelda.dlcs, 2);
        assert_eq!(zelda.developers, vec![Company::new("Nintendo EPD", Some("Japan"))]);
        assert_eq!(zelda.publishers, vec![Company::new("Nintendo", Some("Japan"))]);
        assert_eq!(zelda.platforms, vec!["Nintendo Switch"]);
        assert_eq!(zelda.genres, vec!["Adventure"]);
        assert!(zelda.has_reliable_votes && zelda.has_collections);

        let hades = &loaded.table.games[1];
        assert_eq!(hades.platforms.len(), 2);
        assert_eq!(hades.developers[0].country, None);
        assert_eq!(
            hades.publishers[0],
            Company::new("Supergiant Games", Some("United States"))
        );
        assert!(hades.game_modes.is_empty());
        assert_eq!(hades.genres, vec!["Indie", "Action"]);
        assert_eq!(hades.age_rating, "Teen");
    }

    #[test]
    fn parquet_without_a_required_column_fails_to_load() {
        let file = write_parquet(vec![("name", text([Some("Halo"), Some("Myst"), None]))]);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'first_release_date'"));
    }
}
