//! Explicit shift table reader.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{ShiftBlock, ShiftDays, ShiftTableRow, parse_clock_hour};

use super::aliases::{ColumnMap, SHIFTS};
use super::{Ingested, open, parse_decimal, read_table};

/// Reads shift blocks of {Role, Shift, Start, End, Hours, Days}.
///
/// Role is optional; rows without one apply to every role. Hours defaults to
/// the span of start and end. Days is `Weekday`, `Weekend` or blank for every
/// day. Rows with a blank label, an unparsable start or end, or an unknown
/// Days value are dropped. Row order is kept, since it decides allocation
/// order.
pub fn read_shifts<R: Read>(reader: R, source_name: &str) -> EngineResult<Ingested<ShiftTableRow>> {
    read_table(reader, source_name, &SHIFTS, parse_row)
}

/// Reads the shift table from a file.
pub fn read_shifts_path<P: AsRef<Path>>(path: P) -> EngineResult<Ingested<ShiftTableRow>> {
    let path = path.as_ref();
    read_shifts(open(path)?, &path.display().to_string())
}

fn parse_row(columns: &ColumnMap, record: &StringRecord) -> Option<ShiftTableRow> {
    let label = columns.get(record, "Shift")?;
    let start = parse_clock_hour(columns.get(record, "Start")?)?;
    let end = parse_clock_hour(columns.get(record, "End")?)?;

    let days = match columns.get(record, "Days") {
        Some(raw) => ShiftDays::from_label(raw)?,
        None => ShiftDays::Every,
    };

    let block = ShiftBlock::new(label, start, end).on_days(days);
    let block = match columns
        .get(record, "Hours")
        .and_then(parse_decimal)
        .filter(|hours| *hours > Decimal::ZERO)
    {
        Some(hours) => block.with_hours(hours),
        None => block,
    };

    Some(ShiftTableRow {
        role: columns.get(record, "Role").map(str::to_string),
        block,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_reads_unscoped_blocks_in_order() {
        let csv = "Shift,Start Time,End Time,Hours\nNight,19:00,07:00,12\nDay,7,19,\n";
        let shifts = read_shifts(csv.as_bytes(), "inline").unwrap();

        assert_eq!(shifts.records.len(), 2);
        assert_eq!(shifts.records[0].block.label, "Night");
        assert_eq!(shifts.records[0].role, None);
        assert_eq!(shifts.records[1].block.hours, Decimal::new(12, 0));
    }

    #[test]
    fn test_role_scoped_rows() {
        let csv = "Role,Shift,Start,End\nNA,Evening,15,23\n";
        let shifts = read_shifts(csv.as_bytes(), "inline").unwrap();
        assert!(shifts.records[0].applies_to("NA"));
        assert!(!shifts.records[0].applies_to("RN"));
    }

    #[test]
    fn test_bad_times_are_dropped() {
        let csv = "Shift,Start,End\nDay,7,19\nSwing,noon,23\n,7,19\n";
        let shifts = read_shifts(csv.as_bytes(), "inline").unwrap();
        assert_eq!(shifts.records.len(), 1);
        assert_eq!(shifts.dropped, 2);
    }

    #[test]
    fn test_missing_time_columns_are_fatal() {
        let csv = "Shift,Hours\nDay,12\n";
        match read_shifts(csv.as_bytes(), "inline") {
            Err(EngineError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["Start", "End"]);
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_days_column_scopes_blocks() {
        let csv = "Shift,Start,End,Days\n\
                   Day,7,19,Weekday\n\
                   Long Day,7,7,weekends\n\
                   Night,19,7,\n\
                   Holiday,7,19,Holidays\n";
        let shifts = read_shifts(csv.as_bytes(), "inline").unwrap();

        let days: Vec<ShiftDays> = shifts.records.iter().map(|r| r.block.days).collect();
        assert_eq!(days, vec![ShiftDays::Weekday, ShiftDays::Weekend, ShiftDays::Every]);
        assert_eq!(shifts.dropped, 1);
    }
}
