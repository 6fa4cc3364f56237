//! CSV price files.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use tailrisk_core::{Date, PriceHistory};
use tracing::{debug, info, warn};

use crate::error::{FileError, FileResult};

// =============================================================================
// COLUMN SELECTION
// =============================================================================

/// A CSV column, addressed by header name or zero-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// Header name, matched case-insensitively.
    Name(String),
    /// Zero-based position.
    Index(usize),
}

impl ColumnSelector {
    fn resolve(&self, headers: &csv::StringRecord) -> Option<usize> {
        match self {
            Self::Index(i) => (*i < headers.len()).then_some(*i),
            Self::Name(name) => headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim())),
        }
    }
}

impl FromStr for ColumnSelector {
    type Err = std::convert::Infallible;

    /// All-digit input selects by index, anything else by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<usize>() {
            Ok(i) => Self::Index(i),
            Err(_) => Self::Name(s.to_string()),
        })
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "'{name}'"),
            Self::Index(i) => write!(f, "#{i}"),
        }
    }
}

// =============================================================================
// PRICE FILE READER
// =============================================================================

/// One dated closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Closing price.
    pub price: f64,
}

/// Reader for daily price exports with a header row.
///
/// Defaults match a standard daily-price download: ISO dates in `Date`,
/// closing prices in `Close`, comma-separated.
#[derive(Debug, Clone)]
pub struct PriceFileReader {
    date_column: ColumnSelector,
    price_column: ColumnSelector,
    date_format: String,
    delimiter: u8,
}

impl Default for PriceFileReader {
    fn default() -> Self {
        Self {
            date_column: ColumnSelector::Name("Date".to_string()),
            price_column: ColumnSelector::Name("Close".to_string()),
            date_format: "%Y-%m-%d".to_string(),
            delimiter: b',',
        }
    }
}

impl PriceFileReader {
    /// Creates a reader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date column.
    #[must_use]
    pub fn with_date_column(mut self, column: ColumnSelector) -> Self {
        self.date_column = column;
        self
    }

    /// Sets the price column.
    #[must_use]
    pub fn with_price_column(mut self, column: ColumnSelector) -> Self {
        self.price_column = column;
        self
    }

    /// Sets the `chrono` date format.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Reads a price file in file order.
    pub fn read_path(&self, path: impl AsRef<Path>) -> FileResult<Vec<PricePoint>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_from(file, path)
    }

    /// Reads prices from any reader; `origin` names the source in errors
    /// and log events.
    pub fn read_from<R: Read>(&self, input: R, origin: &Path) -> FileResult<Vec<PricePoint>> {
        let csv_error = |source: csv::Error| FileError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(input);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let date_idx = self.column_index(&self.date_column, &headers, origin)?;
        let price_idx = self.column_index(&self.price_column, &headers, origin)?;

        let mut points = Vec::new();
        let mut skipped = 0usize;

        for (i, result) in reader.records().enumerate() {
            let row = i + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(csv_error(e)),
                Err(e) => {
                    warn!(file = %origin.display(), row, error = %e, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };

            match self.parse_record(&record, date_idx, price_idx) {
                Ok(point) => points.push(point),
                Err(reason) => {
                    warn!(file = %origin.display(), row, %reason, "skipping malformed row");
                    skipped += 1;
                }
            }
        }

        if points.is_empty() {
            return Err(FileError::NoData {
                path: origin.to_path_buf(),
            });
        }

        debug!(
            file = %origin.display(),
            rows = points.len(),
            skipped,
            "loaded price file"
        );
        Ok(points)
    }

    fn column_index(
        &self,
        column: &ColumnSelector,
        headers: &csv::StringRecord,
        origin: &Path,
    ) -> FileResult<usize> {
        column.resolve(headers).ok_or_else(|| FileError::MissingColumn {
            path: origin.to_path_buf(),
            column: column.to_string(),
        })
    }

    fn parse_record(
        &self,
        record: &csv::StringRecord,
        date_idx: usize,
        price_idx: usize,
    ) -> Result<PricePoint, String> {
        let date_cell = record
            .get(date_idx)
            .ok_or_else(|| format!("missing date cell at column {date_idx}"))?;
        let price_cell = record
            .get(price_idx)
            .ok_or_else(|| format!("missing price cell at column {price_idx}"))?;

        let date = Date::parse_with_format(date_cell, &self.date_format).map_err(|e| e.to_string())?;
        let price = parse_price(price_cell)?;
        Ok(PricePoint { date, price })
    }
}

/// Parses a price cell, accepting a leading `$` and thousands separators.
///
/// # Example
///
/// ```rust
/// use tailrisk_ext_file::reader::parse_price;
///
/// assert_eq!(parse_price(" $1,234.50 ").unwrap(), 1234.5);
/// assert!(parse_price("null").is_err());
/// ```
pub fn parse_price(cell: &str) -> Result<f64, String> {
    let trimmed = cell.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim().replace(',', "");
    let price: f64 = digits
        .parse()
        .map_err(|_| format!("cannot parse price '{cell}'"))?;
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(format!("price must be positive, got '{cell}'"))
    }
}

// =============================================================================
// TWO-ASSET HISTORY
// =============================================================================

/// Loads two price files and joins them on date.
///
/// Only dates present in both files are kept. Rows are sorted ascending;
/// a date repeated within one file keeps its last price.
pub fn load_price_history(
    path_a: impl AsRef<Path>,
    path_b: impl AsRef<Path>,
    reader: &PriceFileReader,
) -> FileResult<PriceHistory> {
    let (path_a, path_b) = (path_a.as_ref(), path_b.as_ref());
    let series_a = by_date(reader.read_path(path_a)?, path_a);
    let series_b = by_date(reader.read_path(path_b)?, path_b);

    let history = join_on_date(&series_a, &series_b)?;
    if history.is_empty() {
        return Err(FileError::NoOverlap {
            path_a: path_a.to_path_buf(),
            path_b: path_b.to_path_buf(),
        });
    }

    info!(
        observations = history.len(),
        dropped_a = series_a.len() - history.len(),
        dropped_b = series_b.len() - history.len(),
        first = ?history.first_date().map(|d| d.to_string()),
        last = ?history.last_date().map(|d| d.to_string()),
        "joined price histories"
    );
    Ok(history)
}

fn by_date(points: Vec<PricePoint>, origin: &Path) -> BTreeMap<Date, f64> {
    let mut series = BTreeMap::new();
    for point in points {
        if series.insert(point.date, point.price).is_some() {
            warn!(file = %origin.display(), date = %point.date, "duplicate date, keeping last price");
        }
    }
    series
}

/// Inner join of two dated series into a [`PriceHistory`].
pub fn join_on_date(
    series_a: &BTreeMap<Date, f64>,
    series_b: &BTreeMap<Date, f64>,
) -> FileResult<PriceHistory> {
    let mut dates = Vec::new();
    let mut prices_a = Vec::new();
    let mut prices_b = Vec::new();

    for (date, &price_a) in series_a {
        if let Some(&price_b) = series_b.get(date) {
            dates.push(*date);
            prices_a.push(price_a);
            prices_b.push(price_b);
        }
    }

    Ok(PriceHistory::new(dates, prices_a, prices_b)?)
}
