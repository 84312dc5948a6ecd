//! Resource table reader.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{ResourceRecord, parse_clock_hour};

use super::aliases::{ColumnMap, RESOURCES};
use super::{Ingested, open, parse_date, parse_decimal, read_table};

/// Reads resources of {Department, Role, Name, FTE, Shift, Start, End,
/// Leave Start, Leave End}.
///
/// Only Department, Role and FTE are mandatory. Rows with a blank department
/// or role, or a missing or negative FTE, are dropped. Unparsable start, end
/// or leave cells are treated as absent.
pub fn read_resources<R: Read>(
    reader: R,
    source_name: &str,
) -> EngineResult<Ingested<ResourceRecord>> {
    read_table(reader, source_name, &RESOURCES, parse_row)
}

/// Reads the resource table from a file.
pub fn read_resources_path<P: AsRef<Path>>(path: P) -> EngineResult<Ingested<ResourceRecord>> {
    let path = path.as_ref();
    read_resources(open(path)?, &path.display().to_string())
}

fn parse_row(columns: &ColumnMap, record: &StringRecord) -> Option<ResourceRecord> {
    let department = columns.get(record, "Department")?;
    let role = columns.get(record, "Role")?;
    let fte = parse_decimal(columns.get(record, "FTE")?)?;
    if fte < Decimal::ZERO {
        return None;
    }

    Some(ResourceRecord {
        department: department.to_string(),
        role: role.to_string(),
        name: columns.get(record, "Name").unwrap_or_default().to_string(),
        fte,
        shift: columns.get(record, "Shift").map(str::to_string),
        start: columns.get(record, "Start").and_then(parse_clock_hour),
        end: columns.get(record, "End").and_then(parse_clock_hour),
        leave_start: columns.get(record, "Leave_Start").and_then(parse_date),
        leave_end: columns.get(record, "Leave_End").and_then(parse_date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_reads_resources_with_aliases() {
        let csv = "Cost Center,Job Title,Employee,Unit FTEs,Shift Name,Start Time,End Time\n\
                   4 West,RN,Avery,0.9,Night,19:00,07:00\n\
                   4 West,RN,Blake,1.0,,,\n";
        let resources = read_resources(csv.as_bytes(), "inline").unwrap();

        assert_eq!(resources.records.len(), 2);
        let avery = &resources.records[0];
        assert_eq!(avery.name, "Avery");
        assert_eq!(avery.fte, Decimal::new(9, 1));
        assert_eq!(avery.shift.as_deref(), Some("Night"));
        assert_eq!((avery.start, avery.end), (Some(19), Some(7)));

        let blake = &resources.records[1];
        assert_eq!(blake.shift, None);
        assert_eq!(blake.shift_bucket(), "All");
    }

    #[test]
    fn test_rows_without_department_or_role_are_dropped() {
        let csv = "Department,Role,FTE\n4 West,RN,1\n,RN,1\n4 West,,1\n4 West,RN,lots\n4 West,RN,-1\n";
        let resources = read_resources(csv.as_bytes(), "inline").unwrap();
        assert_eq!(resources.records.len(), 1);
        assert_eq!(resources.dropped, 4);
    }

    #[test]
    fn test_missing_fte_column_is_fatal() {
        let csv = "Department,Role,Name\n4 West,RN,Avery\n";
        match read_resources(csv.as_bytes(), "inline") {
            Err(EngineError::MissingColumns { missing, .. }) => assert_eq!(missing, vec!["FTE"]),
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_reads_leave_dates() {
        let csv = "Department,Role,FTE,Leave Start,Leave End\n\
                   4 West,RN,1,2025-03-03,03/23/2025\n\
                   4 West,RN,1,soon,\n";
        let resources = read_resources(csv.as_bytes(), "inline").unwrap();

        assert_eq!(resources.records.len(), 2);
        let first = &resources.records[0];
        assert_eq!(first.leave_start, parse_date("2025-03-03"));
        assert_eq!(first.leave_end, parse_date("2025-03-23"));
        assert_eq!(first.available_fte(6), Decimal::new(5, 1));

        let second = &resources.records[1];
        assert_eq!((second.leave_start, second.leave_end), (None, None));
    }
}
