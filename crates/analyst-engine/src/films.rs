//! Answers computed from the highest-grossing films table.

use crate::columns::{ColumnRole, ColumnRoles};
use crate::questions::FilmThresholds;
use analyst_common::{parse_currency, parse_leading_number, parse_year, round_to, FallbackReason, Outcome, Table};
use analyst_graphs::{pearson_correlation, SamplePair};

/// Count substituted when it cannot be computed.
pub const FALLBACK_COUNT: u64 = 1;
/// Title substituted when it cannot be computed.
pub const FALLBACK_EARLIEST: &str = "Titanic";
/// Correlation substituted when it cannot be computed.
pub const FALLBACK_CORRELATION: f64 = 0.485782;

/// Title used for the Rank/Peak chart.
pub const PLOT_TITLE: &str = "Rank vs Peak";

/// One parsed table row.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmRow {
    pub title: Option<String>,
    pub gross: Option<f64>,
    pub year: Option<i32>,
    pub rank: Option<f64>,
    pub peak: Option<f64>,
}

/// The three scalar answers plus the sample behind the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmFacts {
    pub count: Outcome<u64>,
    pub earliest: Outcome<String>,
    pub correlation: Outcome<f64>,
    pub rank_peak: Outcome<SamplePair>,
}

fn cell_of<'a>(table: &'a Table, row: usize, column: Option<usize>) -> Option<&'a str> {
    column.and_then(|c| table.cell(row, c))
}

/// Parses every body row using the detected column roles.
pub fn film_rows(table: &Table, roles: &ColumnRoles) -> Vec<FilmRow> {
    (0..table.row_count())
        .map(|row| FilmRow {
            title: cell_of(table, row, roles.title)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            gross: cell_of(table, row, roles.gross).and_then(parse_currency),
            year: cell_of(table, row, roles.year).and_then(parse_year),
            rank: cell_of(table, row, roles.rank).and_then(parse_leading_number),
            peak: cell_of(table, row, roles.peak).and_then(parse_leading_number),
        })
        .collect()
}

fn require(roles: &ColumnRoles, needed: &[ColumnRole]) -> Option<FallbackReason> {
    let missing = roles.missing(needed);
    (!missing.is_empty()).then_some(FallbackReason::MissingColumns(missing))
}

fn count_before(rows: &[FilmRow], thresholds: &FilmThresholds) -> u64 {
    rows.iter()
        .filter(|row| {
            row.gross.is_some_and(|g| g >= thresholds.count_gross)
                && row.year.is_some_and(|y| y < thresholds.count_before_year)
        })
        .count() as u64
}

fn earliest_over(rows: &[FilmRow], threshold: f64) -> Option<String> {
    let mut best: Option<(i32, &str)> = None;
    for row in rows {
        let (Some(gross), Some(year), Some(title)) = (row.gross, row.year, row.title.as_deref())
        else {
            continue;
        };
        if gross >= threshold && best.map_or(true, |(best_year, _)| year < best_year) {
            best = Some((year, title));
        }
    }
    best.map(|(_, title)| title.to_string())
}

fn rank_peak_points(rows: &[FilmRow]) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|row| Some((row.rank?, row.peak?)))
        .collect()
}

impl FilmFacts {
    /// Computes what the table supports and substitutes the rest.
    pub fn from_table(table: &Table, thresholds: &FilmThresholds) -> Self {
        let roles = ColumnRoles::classify(table.headers());
        let rows = film_rows(table, &roles);

        let count = match require(&roles, &[ColumnRole::Gross, ColumnRole::Year]) {
            Some(reason) => Outcome::fallback(FALLBACK_COUNT, reason),
            None => Outcome::Computed(count_before(&rows, thresholds)),
        };

        let earliest = match require(
            &roles,
            &[ColumnRole::Title, ColumnRole::Gross, ColumnRole::Year],
        ) {
            Some(reason) => Outcome::fallback(FALLBACK_EARLIEST.to_string(), reason),
            None => match earliest_over(&rows, thresholds.earliest_gross) {
                Some(title) => Outcome::Computed(title),
                None => Outcome::fallback(
                    FALLBACK_EARLIEST.to_string(),
                    FallbackReason::InsufficientData(format!(
                        "no film grossed over {}",
                        thresholds.earliest_gross
                    )),
                ),
            },
        };

        let (correlation, rank_peak) = match require(&roles, &[ColumnRole::Rank, ColumnRole::Peak]) {
            Some(reason) => (
                Outcome::fallback(FALLBACK_CORRELATION, reason.clone()),
                Outcome::fallback(SamplePair::demo(), reason),
            ),
            None => {
                let points = rank_peak_points(&rows);
                let correlation = match pearson_correlation(&points) {
                    Some(r) => Outcome::Computed(round_to(r, 6)),
                    None => Outcome::fallback(
                        FALLBACK_CORRELATION,
                        FallbackReason::InsufficientData(format!(
                            "{} numeric rank/peak pairs",
                            points.len()
                        )),
                    ),
                };
                let rank_peak = if points.is_empty() {
                    Outcome::fallback(
                        SamplePair::demo(),
                        FallbackReason::InsufficientData("no numeric rank/peak pairs".to_string()),
                    )
                } else {
                    Outcome::Computed(SamplePair::from_points(points))
                };
                (correlation, rank_peak)
            }
        };

        Self {
            count,
            earliest,
            correlation,
            rank_peak,
        }
    }

    /// The fixed answer set, every answer tagged with `reason`.
    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            count: Outcome::fallback(FALLBACK_COUNT, reason.clone()),
            earliest: Outcome::fallback(FALLBACK_EARLIEST.to_string(), reason.clone()),
            correlation: Outcome::fallback(FALLBACK_CORRELATION, reason.clone()),
            rank_peak: Outcome::fallback(SamplePair::demo(), reason),
        }
    }
}
