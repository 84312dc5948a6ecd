//! CSV ingestion of the input tables.
//!
//! Readers accept any [`std::io::Read`] and resolve headers through the alias
//! tables in [`aliases`], so the planning code only ever sees canonical,
//! typed records. Rows with unusable cells are dropped and counted; a table
//! missing its mandatory columns is rejected with `MissingColumns`.
//!
//! # Example
//!
//! ```
//! use staffing_engine::ingest::read_census;
//!
//! let csv = "Date,Hour,Census\n2025-06-01,7,18\nnot a date,8,20\n";
//! let census = read_census(csv.as_bytes(), "census.csv")?;
//! assert_eq!(census.records.len(), 1);
//! assert_eq!(census.dropped, 1);
//! # Ok::<(), staffing_engine::error::EngineError>(())
//! ```

pub mod aliases;
mod census;
mod resources;
mod rules;
mod shifts;

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

pub use aliases::{ColumnMap, FieldAliases, TableSchema, normalize_header};
pub use census::{read_census, read_census_path};
pub use resources::{read_resources, read_resources_path};
pub use rules::{read_rules, read_rules_path};
pub use shifts::{read_shifts, read_shifts_path};

/// Records read from one table, plus the number of rows that were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested<T> {
    /// Rows that parsed into canonical records, in file order.
    pub records: Vec<T>,
    /// Rows skipped because a required cell was blank or malformed.
    pub dropped: usize,
}

impl<T> Default for Ingested<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            dropped: 0,
        }
    }
}

/// Reads every row of a table, keeping those `parse_row` accepts.
fn read_table<R, T, F>(
    reader: R,
    source_name: &str,
    schema: &TableSchema,
    mut parse_row: F,
) -> EngineResult<Ingested<T>>
where
    R: Read,
    F: FnMut(&ColumnMap, &StringRecord) -> Option<T>,
{
    let read_error = |e: csv::Error| EngineError::InputRead {
        source_name: source_name.to_string(),
        message: e.to_string(),
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(read_error)?.clone();
    let columns = ColumnMap::resolve(&headers, schema);
    columns.require(schema)?;

    let mut ingested = Ingested::default();
    for record in rdr.records() {
        let record = record.map_err(read_error)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        match parse_row(&columns, &record) {
            Some(parsed) => ingested.records.push(parsed),
            None => ingested.dropped += 1,
        }
    }

    if ingested.dropped > 0 {
        warn!(
            table = schema.table,
            source = source_name,
            dropped = ingested.dropped,
            "Dropped malformed rows"
        );
    }
    debug!(
        table = schema.table,
        source = source_name,
        rows = ingested.records.len(),
        "Table ingested"
    );

    Ok(ingested)
}

/// Opens a file for one of the `*_path` readers.
fn open(path: &Path) -> EngineResult<File> {
    File::open(path).map_err(|e| EngineError::InputRead {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a calendar date from the accepted date and datetime forms.
///
/// # Example
///
/// ```
/// use staffing_engine::ingest::parse_date;
/// use chrono::NaiveDate;
///
/// let june_first = NaiveDate::from_ymd_opt(2025, 6, 1);
/// assert_eq!(parse_date("2025-06-01"), june_first);
/// assert_eq!(parse_date("06/01/2025"), june_first);
/// assert_eq!(parse_date("2025-06-01 07:00:00"), june_first);
/// assert_eq!(parse_date("June 1st"), None);
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

/// Parses a decimal cell, tolerating thousands separators.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Parses a whole hour of day in 0-23, accepting `"7"` and `"7.0"`.
pub fn parse_hour(raw: &str) -> Option<u8> {
    let value = parse_decimal(raw)?;
    if value.fract() != Decimal::ZERO || value < Decimal::ZERO || value > Decimal::from(23) {
        return None;
    }
    value.to_u8()
}
