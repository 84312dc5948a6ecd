//! Staffing rules table reader.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::EngineResult;
use crate::models::{ALL_SHIFTS, RatioSet, StaffingRule};

use super::aliases::{ColumnMap, STAFFING_RULES};
use super::{Ingested, open, parse_decimal, read_table};

/// Reads staffing rules in either the full or the simplified shape.
///
/// Full rules carry {Department, Role, Shift, Ratio_High, Ratio_Medium,
/// Ratio_Low}; simplified rules carry {Role, Ratio}. A blank or unparsable
/// seasonal ratio falls back to `Ratio` when that column exists, otherwise it
/// stays missing and plans zero demand. Rows with a blank role are dropped.
///
/// # Errors
///
/// `MissingColumns` if Role or every ratio column is absent.
pub fn read_rules<R: Read>(reader: R, source_name: &str) -> EngineResult<Ingested<StaffingRule>> {
    read_table(reader, source_name, &STAFFING_RULES, parse_row)
}

/// Reads the staffing rules table from a file.
pub fn read_rules_path<P: AsRef<Path>>(path: P) -> EngineResult<Ingested<StaffingRule>> {
    let path = path.as_ref();
    read_rules(open(path)?, &path.display().to_string())
}

fn parse_row(columns: &ColumnMap, record: &StringRecord) -> Option<StaffingRule> {
    let role = columns.get(record, "Role")?;
    let ratio = |field: &str| columns.get(record, field).and_then(parse_decimal);
    let fallback = ratio("Ratio");

    let ratios = RatioSet {
        high: ratio("Ratio_High").or(fallback),
        medium: ratio("Ratio_Medium").or(fallback),
        low: ratio("Ratio_Low").or(fallback),
    };

    Some(StaffingRule::new(
        columns.get(record, "Department").unwrap_or_default(),
        role,
        columns.get(record, "Shift").unwrap_or(ALL_SHIFTS),
        ratios,
    ))
}
