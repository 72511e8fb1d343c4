//! Spreadsheet ingestion service
//!
//! Reads expense spreadsheets (CSV or Excel/ODS workbooks), pulls the
//! `Description` and `Price` columns out of each, stamps every row with the
//! file it came from, and merges everything into one record store.
//!
//! Ingestion is all-or-nothing: the first file that cannot be read or lacks
//! a required column fails the whole call.

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRow, Money, RecordStore, RowId};

/// Header of the description column
pub const DESCRIPTION_COLUMN: &str = "Description";

/// Header of the price column
pub const PRICE_COLUMN: &str = "Price";

/// Spreadsheet formats understood by the ingester
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    /// Comma-separated text
    Csv,
    /// Excel or OpenDocument workbook; only the first sheet is read
    Workbook,
}

impl SpreadsheetFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Result of merging a set of spreadsheets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingestion {
    /// The merged store
    pub store: RecordStore,
    /// Sum of every price in the store
    pub total: Money,
}

impl Ingestion {
    /// Status line shown after loading, e.g. `Total Price: $7.25`
    pub fn status(&self) -> String {
        format!("Total Price: ${}", self.total.to_decimal_string())
    }
}

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Index of the description column
    pub description_column: usize,
    /// Index of the price column
    pub price_column: usize,
}

impl ColumnMapping {
    /// Locate the required columns; header names must match exactly
    pub fn from_headers<S: AsRef<str>>(headers: &[S], source: &str) -> ExpenseResult<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.as_ref() == name)
                .ok_or_else(|| ExpenseError::missing_column(source, name))
        };

        Ok(Self {
            description_column: find(DESCRIPTION_COLUMN)?,
            price_column: find(PRICE_COLUMN)?,
        })
    }
}

/// A raw cell value before it is typed into a row
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn from_text(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::from_text(s),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            other => Cell::Text(other.to_string()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn into_text(self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", n as i64)),
            Cell::Number(n) => Some(n.to_string()),
        }
    }
}

/// Base name of a file, used as the row source
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load and merge spreadsheets in the given order
///
/// An empty list yields an empty store with a zero total.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> ExpenseResult<Ingestion> {
    let mut merged = Vec::new();

    for path in paths {
        let rows = load_file(path.as_ref())?;
        merged.extend(rows);
    }

    let store = RecordStore::from_rows(merged);

    // Bounds every search and per-label total as well as the grand total
    store
        .iter()
        .try_fold(Money::zero(), |acc, row| acc.checked_add(row.price.abs()))
        .ok_or_else(|| {
            ExpenseError::Validation("Prices in the loaded files are too large to total".into())
        })?;
    let total = store.total();

    info!(
        files = paths.len(),
        rows = store.len(),
        total = %total,
        "merged spreadsheets"
    );

    Ok(Ingestion { store, total })
}

/// Load the rows of a single spreadsheet
///
/// Row IDs are provisional; they are reassigned when rows are merged into a
/// store.
pub fn load_file(path: &Path) -> ExpenseResult<Vec<ExpenseRow>> {
    let source = source_name(path);

    let format = SpreadsheetFormat::from_path(path).ok_or_else(|| {
        ExpenseError::file_read(&source, "unsupported file type (expected .csv, .xlsx, .xls or .ods)")
    })?;

    let rows = match format {
        SpreadsheetFormat::Csv => {
            let file = std::fs::File::open(path).map_err(|e| ExpenseError::file_read(&source, e))?;
            read_csv(file, &source)?
        }
        SpreadsheetFormat::Workbook => read_workbook(path, &source)?,
    };

    debug!(file = %source, ?format, rows = rows.len(), "loaded spreadsheet");
    Ok(rows)
}

/// Read expense rows from CSV data
pub fn read_csv<R: Read>(reader: R, source: &str) -> ExpenseResult<Vec<ExpenseRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ExpenseError::file_read(source, e))?
        .iter()
        .map(str::to_string)
        .collect();
    let mapping = ColumnMapping::from_headers(&headers, source)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ExpenseError::file_read(source, e))?;
        let cell = |col: usize| record.get(col).map(Cell::from_text).unwrap_or(Cell::Empty);
        // Blank lines are skipped by the reader, so count from its position
        let line = record
            .position()
            .map_or(idx + 2, |pos| pos.line() as usize);

        if let Some(row) = build_row(
            cell(mapping.description_column),
            cell(mapping.price_column),
            source,
            line,
        )? {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Read expense rows from the first sheet of a workbook
fn read_workbook(path: &Path, source: &str) -> ExpenseResult<Vec<ExpenseRow>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ExpenseError::file_read(source, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExpenseError::file_read(source, "workbook has no sheets"))?
        .map_err(|e| ExpenseError::file_read(source, e))?;

    // The used range may start below row 1; sheet rows are 1-based
    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|data| Cell::from_data(data).into_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    let mapping = ColumnMapping::from_headers(&headers, source)?;

    let mut rows = Vec::new();
    for (idx, sheet_row) in sheet_rows.enumerate() {
        let cell = |col: usize| sheet_row.get(col).map(Cell::from_data).unwrap_or(Cell::Empty);

        if let Some(row) = build_row(
            cell(mapping.description_column),
            cell(mapping.price_column),
            source,
            header_row + idx + 1,
        )? {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Type one spreadsheet line; `None` for a line with both cells blank
fn build_row(
    description: Cell,
    price: Cell,
    source: &str,
    line: usize,
) -> ExpenseResult<Option<ExpenseRow>> {
    if description.is_empty() && price.is_empty() {
        return Ok(None);
    }

    let invalid = |value: String| ExpenseError::InvalidPrice {
        file: source.to_string(),
        row: line,
        value,
    };

    let price = match price {
        // A blank price adds nothing to any total
        Cell::Empty => Money::zero(),
        Cell::Number(n) => Money::from_f64(n).ok_or_else(|| invalid(n.to_string()))?,
        Cell::Text(s) if s.trim().is_empty() => Money::zero(),
        Cell::Text(s) => Money::parse(&s).map_err(|_| invalid(s.clone()))?,
    };

    Ok(Some(ExpenseRow::new(
        RowId::new(0),
        description.into_text(),
        price,
        source,
    )))
}
