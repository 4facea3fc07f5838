use std::collections::HashSet;

use super::loader::LoadedDataset;
use super::model::{Game, AGE_RATINGS, COLUMNS};

/// Missing cells of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingValues {
    pub column: &'static str,
    pub count: usize,
    pub percent: f64,
}

/// Everything the "Metrics & Quality" page reports about the data.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityChecks {
    pub missing: Vec<MissingValues>,
    pub duplicate_rows: usize,
    pub invalid_ratings: usize,
    pub invalid_age_ratings: usize,
    pub malformed_lists: usize,
    pub misaligned_companies: usize,
    pub platform_mismatches: usize,
    pub rejected_rows: usize,
}

pub fn check(loaded: &LoadedDataset) -> QualityChecks {
    let report = &loaded.report;
    let rows = report.rows_read.max(1) as f64;
    let missing = COLUMNS
        .iter()
        .map(|&column| {
            let count = report.missing.get(column).copied().unwrap_or(0);
            MissingValues {
                column,
                count,
                percent: round2(count as f64 / rows * 100.0),
            }
        })
        .collect();

    QualityChecks {
        missing,
        duplicate_rows: report.duplicate_rows,
        invalid_ratings: invalid_ratings(&loaded.table.games),
        invalid_age_ratings: invalid_age_ratings(&loaded.table.games),
        malformed_lists: report.malformed_total(),
        misaligned_companies: report.misaligned_companies,
        platform_mismatches: report.platform_mismatches,
        rejected_rows: report.rejected,
    }
}

/// Rows identical to an earlier row.
pub fn duplicate_rows(games: &[Game]) -> usize {
    let mut seen = HashSet::with_capacity(games.len());
    games
        .iter()
        .filter_map(|g| serde_json::to_string(g).ok())
        .filter(|key| !seen.insert(key.clone()))
        .count()
}

pub fn invalid_ratings(games: &[Game]) -> usize {
    games
        .iter()
        .filter(|g| !(0.0..=100.0).contains(&g.total_rating))
        .count()
}

pub fn invalid_age_ratings(games: &[Game]) -> usize {
    games
        .iter()
        .filter(|g| !AGE_RATINGS.contains(&g.age_rating.as_str()))
        .count()
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
