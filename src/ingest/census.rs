//! Census table reader.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::CensusRecord;

use super::aliases::{CENSUS, ColumnMap};
use super::{Ingested, open, parse_date, parse_decimal, parse_hour, read_table};

/// Reads census rows of {Date, Hour, Census}.
///
/// Hour is optional and a blank hour means 0 (a daily figure). Rows with an
/// unparsable date, an hour outside 0-23, or a missing or negative census
/// are dropped.
///
/// # Errors
///
/// `MissingColumns` if Date or Census is absent; `InputRead` if the CSV
/// itself cannot be read.
pub fn read_census<R: Read>(reader: R, source_name: &str) -> EngineResult<Ingested<CensusRecord>> {
    read_table(reader, source_name, &CENSUS, parse_row)
}

/// Reads the census table from a file.
pub fn read_census_path<P: AsRef<Path>>(path: P) -> EngineResult<Ingested<CensusRecord>> {
    let path = path.as_ref();
    read_census(open(path)?, &path.display().to_string())
}

fn parse_row(columns: &ColumnMap, record: &StringRecord) -> Option<CensusRecord> {
    let date = parse_date(columns.get(record, "Date")?)?;
    let hour = match columns.get(record, "Hour") {
        Some(raw) => parse_hour(raw)?,
        None => 0,
    };
    let census = parse_decimal(columns.get(record, "Census")?)?;
    if census < Decimal::ZERO {
        return None;
    }
    Some(CensusRecord::new(date, hour, census))
}
