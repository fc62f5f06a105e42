//! Tabular data model and best-effort HTML table extraction.

use crate::error::{AnalystError, Result};
use crate::utils::strip_footnotes;
use scraper::{ElementRef, Html, Selector};

/// Minimum body rows for a table to count as the "main" table.
const MAIN_TABLE_MIN_ROWS: usize = 10;
/// Minimum columns for a table to count as the "main" table.
const MAIN_TABLE_MIN_COLUMNS: usize = 3;

/// A table of text cells with one header row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Column headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Body rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, taking ragged rows into account.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// A single cell, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// All cells of one column; missing cells of ragged rows read as `""`.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(column).map_or("", String::as_str))
    }

    /// Whether the table has no body rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct TableSelectors {
    wikitable: Selector,
    any_table: Selector,
    row: Selector,
    cell: Selector,
    data_cell: Selector,
}

impl TableSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            wikitable: selector("table.wikitable")?,
            any_table: selector("table")?,
            row: selector("tr")?,
            cell: selector("th, td")?,
            data_cell: selector("td")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AnalystError::parse(format!("invalid selector '{css}': {e:?}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let raw = cell.text().collect::<Vec<_>>().join(" ");
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    strip_footnotes(&collapsed)
}

fn extract_table(element: ElementRef<'_>, selectors: &TableSelectors) -> Table {
    let mut headers = Vec::new();
    let mut rows = Vec::new();

    for row in element.select(&selectors.row) {
        let cells: Vec<String> = row.select(&selectors.cell).map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }

        let is_header_row = row.select(&selectors.data_cell).next().is_none();
        if is_header_row && rows.is_empty() {
            // Multi-level headers collapse to the innermost row.
            headers = cells;
        } else {
            rows.push(cells);
        }
    }

    if headers.is_empty() {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        headers = (1..=width).map(|i| format!("Column {i}")).collect();
    }

    Table::new(headers, rows)
}

/// Extracts every table from an HTML document, preferring `wikitable`s.
pub fn parse_html_tables(html: &str) -> Result<Vec<Table>> {
    let selectors = TableSelectors::new()?;
    let document = Html::parse_document(html);

    let mut tables: Vec<Table> = document
        .select(&selectors.wikitable)
        .map(|element| extract_table(element, &selectors))
        .collect();

    if tables.is_empty() {
        tables = document
            .select(&selectors.any_table)
            .map(|element| extract_table(element, &selectors))
            .collect();
    }

    tables.retain(|table| !table.is_empty());
    Ok(tables)
}

/// Picks the main data table: the first with more than ten rows and more
/// than three columns, otherwise the first table.
pub fn select_main_table(tables: Vec<Table>) -> Option<Table> {
    let main_index = tables.iter().position(|table| {
        table.row_count() > MAIN_TABLE_MIN_ROWS && table.column_count() > MAIN_TABLE_MIN_COLUMNS
    });

    let mut tables = tables;
    match main_index {
        Some(index) => Some(tables.swap_remove(index)),
        None => tables.into_iter().next(),
    }
}
