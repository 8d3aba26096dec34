//! CSV repricing stream.
//!
//! Reads product rows, resolves each row's price through a
//! [`PriceResolver`], and writes the row back out with the new price
//! appended. Output is flushed after every row so a long run shows progress.
//!
//! ## Input column contract (positional)
//!
//! | Index | Column          | Example   |
//! |-------|-----------------|-----------|
//! | 0     | product name    | `Bacon`   |
//! | 1     | current price   | `2.20`    |
//! | 2     | minimum price   | `2.12`    |
//! | 3     | maximum price   | `2.19`    |
//!
//! The first row is a header and is skipped whatever it contains. Extra
//! columns are carried through to the output unchanged.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use pp_core::{PriceResolver, ResolveError};
use tracing::{debug, info, warn};

use crate::money::{price_to_cents, Cents, MoneyError};

/// Header written once at the top of the output.
pub const OUTPUT_HEADER: [&str; 5] = [
    "Product Name",
    "Original Price",
    "Minimum Price",
    "Maximum Price",
    "New Price",
];

/// Appended instead of a price when a row has no valid price.
pub const DEFAULT_NO_VALID_PRICE_MARKER: &str = "no-valid-price";

const REQUIRED_COLUMNS: usize = 4;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that abort a repricing run. A row without a valid price is not an
/// error; it is annotated with the marker and counted in the report.
#[derive(Debug)]
pub enum FeedError {
    /// The input file could not be opened.
    Open { path: String, reason: String },
    /// The CSV reader rejected a record (bad quoting, ragged row, bad UTF-8).
    Csv {
        source_name: String,
        row: usize,
        reason: String,
    },
    /// A record has fewer than the four required columns.
    ShortRow {
        source_name: String,
        row: usize,
        columns: usize,
    },
    /// A price column could not be converted to cents.
    Price {
        source_name: String,
        row: usize,
        error: MoneyError,
    },
    /// Writing or flushing the output failed.
    Write(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Open { path, reason } => write!(f, "open '{path}': {reason}"),
            FeedError::Csv {
                source_name,
                row,
                reason,
            } => write!(f, "{source_name} row {row}: csv error: {reason}"),
            FeedError::ShortRow {
                source_name,
                row,
                columns,
            } => write!(
                f,
                "{source_name} row {row}: expected at least {REQUIRED_COLUMNS} columns, got {columns}"
            ),
            FeedError::Price {
                source_name,
                row,
                error,
            } => write!(f, "{source_name} row {row}: {error}"),
            FeedError::Write(reason) => write!(f, "write output: {reason}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Price { error, .. } => Some(error),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Row counts for one input, or summed across inputs with [`merge`](Self::merge).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepriceReport {
    pub rows_read: u64,
    /// Rows that received a price different from their current price.
    pub rows_repriced: u64,
    /// Rows whose resolved price equals their current price.
    pub rows_unchanged: u64,
    pub rows_no_valid_price: u64,
}

impl RepriceReport {
    pub fn merge(&mut self, other: &RepriceReport) {
        self.rows_read += other.rows_read;
        self.rows_repriced += other.rows_repriced;
        self.rows_unchanged += other.rows_unchanged;
        self.rows_no_valid_price += other.rows_no_valid_price;
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the output writer. Rows carry their extra input columns, so record
/// lengths vary and the writer must be flexible; a default `csv::Writer`
/// rejects the first row longer than the header.
pub fn output_writer<W: io::Write>(wtr: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().flexible(true).from_writer(wtr)
}

/// Write [`OUTPUT_HEADER`] and flush. `out` should come from [`output_writer`].
pub fn write_header<W: io::Write>(out: &mut csv::Writer<W>) -> Result<(), FeedError> {
    out.write_record(OUTPUT_HEADER)
        .map_err(|e| FeedError::Write(e.to_string()))?;
    out.flush().map_err(|e| FeedError::Write(e.to_string()))
}

/// Reprice every row of the CSV file at `path` into `out`.
pub fn reprice_file<W: io::Write>(
    path: &Path,
    resolver: &PriceResolver,
    marker: &str,
    out: &mut csv::Writer<W>,
) -> Result<RepriceReport, FeedError> {
    let file = File::open(path).map_err(|e| FeedError::Open {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let report = reprice_reader(&path.display().to_string(), file, resolver, marker, out)?;
    info!(
        path = %path.display(),
        rows_read = report.rows_read,
        rows_repriced = report.rows_repriced,
        rows_unchanged = report.rows_unchanged,
        rows_no_valid_price = report.rows_no_valid_price,
        "file repriced"
    );
    Ok(report)
}

/// Reprice CSV from any reader. `source_name` labels errors and logs.
///
/// An input with no rows at all (not even a header) yields an empty report.
/// `out` should come from [`output_writer`] so rows with extra columns fit
/// under the five-column header.
pub fn reprice_reader<R: io::Read, W: io::Write>(
    source_name: &str,
    input: R,
    resolver: &PriceResolver,
    marker: &str,
    out: &mut csv::Writer<W>,
) -> Result<RepriceReport, FeedError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let mut report = RepriceReport::default();

    // Header is row 1.
    for (i, rec) in rdr.records().enumerate() {
        let row = i + 2;
        let record = rec.map_err(|e| FeedError::Csv {
            source_name: source_name.to_string(),
            row,
            reason: e.to_string(),
        })?;

        if record.len() < REQUIRED_COLUMNS {
            return Err(FeedError::ShortRow {
                source_name: source_name.to_string(),
                row,
                columns: record.len(),
            });
        }

        let price = |idx: usize, field: &'static str| -> Result<Cents, FeedError> {
            price_to_cents(&record[idx], field).map_err(|error| FeedError::Price {
                source_name: source_name.to_string(),
                row,
                error,
            })
        };
        let current = price(1, "current_price")?;
        let min = price(2, "minimum_price")?;
        let max = price(3, "maximum_price")?;

        if min > max {
            warn!(
                source = source_name,
                row,
                product = &record[0],
                %min,
                %max,
                "minimum price above maximum; price clamps to maximum"
            );
        }

        report.rows_read += 1;

        let rendered = match resolver.resolve(current.raw(), min.raw(), max.raw()) {
            Ok(new_price) => {
                let new_price = Cents::new(new_price);
                if new_price == current {
                    report.rows_unchanged += 1;
                } else {
                    report.rows_repriced += 1;
                }
                debug!(row, product = &record[0], %current, %new_price, "row resolved");
                new_price.to_string()
            }
            Err(err @ ResolveError::NoValidPrice { .. }) => {
                report.rows_no_valid_price += 1;
                debug!(row, product = &record[0], error = %err, "row has no valid price");
                marker.to_string()
            }
        };

        out.write_record(record.iter().chain(std::iter::once(rendered.as_str())))
            .map_err(|e| FeedError::Write(e.to_string()))?;
        out.flush().map_err(|e| FeedError::Write(e.to_string()))?;
    }

    Ok(report)
}
