//! Header alias tables.
//!
//! Input tables arrive from different teams with different header spellings.
//! Each canonical field lists the spellings it accepts; headers are compared
//! after lower-casing and stripping spaces, underscores and hyphens.

use std::collections::HashMap;

use csv::StringRecord;

use crate::error::{EngineError, EngineResult};

/// A canonical field and the normalised header spellings that map to it.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    /// Canonical field name, as reported in errors and exports.
    pub field: &'static str,
    /// Accepted spellings, already normalised.
    pub aliases: &'static [&'static str],
}

/// Describes one input table: its fields and which of them are mandatory.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// Table name used in errors and logs.
    pub table: &'static str,
    /// Every field the table understands.
    pub fields: &'static [FieldAliases],
    /// Fields that must all be present.
    pub required: &'static [&'static str],
    /// Fields of which at least one must be present; empty means no constraint.
    pub any_of: &'static [&'static str],
}

pub(crate) const CENSUS: TableSchema = TableSchema {
    table: "Census",
    fields: &[
        FieldAliases {
            field: "Date",
            aliases: &["date", "day", "censusdate", "datetime"],
        },
        FieldAliases {
            field: "Hour",
            aliases: &["hour", "hr", "hourofday"],
        },
        FieldAliases {
            field: "Census",
            aliases: &["census", "patients", "patientcount", "adc", "volume"],
        },
    ],
    required: &["Date", "Census"],
    any_of: &[],
};

pub(crate) const STAFFING_RULES: TableSchema = TableSchema {
    table: "Staffing rules",
    fields: &[
        FieldAliases {
            field: "Department",
            aliases: &["department", "dept", "unit", "costcenter"],
        },
        FieldAliases {
            field: "Role",
            aliases: &["role", "position", "job", "jobtitle"],
        },
        FieldAliases {
            field: "Shift",
            aliases: &["shift", "shiftname"],
        },
        FieldAliases {
            field: "Ratio_High",
            aliases: &["ratiohigh", "highratio", "high"],
        },
        FieldAliases {
            field: "Ratio_Medium",
            aliases: &["ratiomedium", "mediumratio", "medium", "ratiomed"],
        },
        FieldAliases {
            field: "Ratio_Low",
            aliases: &["ratiolow", "lowratio", "low"],
        },
        FieldAliases {
            field: "Ratio",
            aliases: &["ratio", "staffratio", "patientsperstaff"],
        },
    ],
    required: &["Role"],
    any_of: &["Ratio_High", "Ratio_Medium", "Ratio_Low", "Ratio"],
};

pub(crate) const RESOURCES: TableSchema = TableSchema {
    table: "Resources",
    fields: &[
        FieldAliases {
            field: "Department",
            aliases: &["department", "dept", "costcenter", "unit"],
        },
        FieldAliases {
            field: "Role",
            aliases: &["role", "position", "job", "jobtitle"],
        },
        FieldAliases {
            field: "Name",
            aliases: &["name", "employee", "staff", "resource"],
        },
        FieldAliases {
            field: "FTE",
            aliases: &["fte", "ftes", "unitfte", "unitftes"],
        },
        FieldAliases {
            field: "Shift",
            aliases: &["shift", "shiftname"],
        },
        FieldAliases {
            field: "Start",
            aliases: &["start", "starttime", "begin"],
        },
        FieldAliases {
            field: "End",
            aliases: &["end", "endtime", "finish"],
        },
        FieldAliases {
            field: "Leave_Start",
            aliases: &["leavestart", "leavebegin", "leavefrom", "leavestartdate"],
        },
        FieldAliases {
            field: "Leave_End",
            aliases: &["leaveend", "leaveto", "leaveuntil", "leaveenddate"],
        },
    ],
    required: &["Department", "Role", "FTE"],
    any_of: &[],
};

pub(crate) const SHIFTS: TableSchema = TableSchema {
    table: "Shifts",
    fields: &[
        FieldAliases {
            field: "Role",
            aliases: &["role", "position", "job", "jobtitle"],
        },
        FieldAliases {
            field: "Shift",
            aliases: &["shift", "shiftname", "name"],
        },
        FieldAliases {
            field: "Start",
            aliases: &["start", "starttime", "begin"],
        },
        FieldAliases {
            field: "End",
            aliases: &["end", "endtime", "finish"],
        },
        FieldAliases {
            field: "Hours",
            aliases: &["hours", "duration", "length"],
        },
        FieldAliases {
            field: "Days",
            aliases: &["days", "daytype", "daysworked", "appliesto"],
        },
    ],
    required: &["Shift", "Start", "End"],
    any_of: &[],
};

/// Normalises a raw header for alias comparison.
///
/// # Example
///
/// ```
/// use staffing_engine::ingest::normalize_header;
///
/// assert_eq!(normalize_header(" Ratio_High "), "ratiohigh");
/// assert_eq!(normalize_header("Start-Time"), "starttime");
/// assert_eq!(normalize_header("Unit FTEs"), "unitftes");
/// ```
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| !(c.is_whitespace() || *c == '_' || *c == '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Maps canonical fields to column positions for one table.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Resolves the header row against a schema.
    ///
    /// The first header matching a field wins; unrecognised headers are ignored.
    pub fn resolve(headers: &StringRecord, schema: &TableSchema) -> Self {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let positions = schema
            .fields
            .iter()
            .filter_map(|field| {
                normalized
                    .iter()
                    .position(|header| field.aliases.iter().any(|alias| alias == header))
                    .map(|position| (field.field, position))
            })
            .collect();
        Self { positions }
    }

    /// Returns true if the field was found in the header row.
    pub fn has(&self, field: &str) -> bool {
        self.positions.contains_key(field)
    }

    /// Fails with `MissingColumns` if mandatory fields are absent.
    pub fn require(&self, schema: &TableSchema) -> EngineResult<()> {
        let mut missing: Vec<String> = schema
            .required
            .iter()
            .filter(|field| !self.has(field))
            .map(|field| field.to_string())
            .collect();
        if !schema.any_of.is_empty() && !schema.any_of.iter().any(|field| self.has(field)) {
            missing.push(schema.any_of.join(" or "));
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(EngineError::MissingColumns {
                table: schema.table.to_string(),
                missing,
            })
        }
    }

    /// Returns the trimmed cell for a field, or `None` if absent or blank.
    pub fn get<'r>(&self, record: &'r StringRecord, field: &str) -> Option<&'r str> {
        self.positions
            .get(field)
            .and_then(|position| record.get(*position))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn test_aliases_are_already_normalised() {
        for schema in [CENSUS, STAFFING_RULES, RESOURCES, SHIFTS] {
            for field in schema.fields {
                for alias in field.aliases {
                    assert_eq!(normalize_header(alias), *alias, "{}.{}", schema.table, field.field);
                }
            }
        }
    }

    #[test]
    fn test_resolve_accepts_variant_spellings() {
        let map = ColumnMap::resolve(&headers(&["Cost Center", "Job Title", "Unit FTEs"]), &RESOURCES);
        assert!(map.has("Department"));
        assert!(map.has("Role"));
        assert!(map.has("FTE"));
        assert!(map.require(&RESOURCES).is_ok());
    }

    #[test]
    fn test_missing_columns_are_all_named() {
        let map = ColumnMap::resolve(&headers(&["Name", "Shift"]), &RESOURCES);
        match map.require(&RESOURCES) {
            Err(EngineError::MissingColumns { table, missing }) => {
                assert_eq!(table, "Resources");
                assert_eq!(missing, vec!["Department", "Role", "FTE"]);
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_any_of_constraint() {
        let simplified = ColumnMap::resolve(&headers(&["Role", "Ratio"]), &STAFFING_RULES);
        assert!(simplified.require(&STAFFING_RULES).is_ok());

        let no_ratio = ColumnMap::resolve(&headers(&["Role", "Shift"]), &STAFFING_RULES);
        match no_ratio.require(&STAFFING_RULES) {
            Err(EngineError::MissingColumns { missing, .. }) => {
                assert_eq!(missing.len(), 1);
                assert!(missing[0].contains("Ratio_High"));
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_get_trims_and_skips_blank_cells() {
        let map = ColumnMap::resolve(&headers(&["Date", "Census"]), &CENSUS);
        let row = StringRecord::from(vec![" 2025-06-01 ", "  "]);
        assert_eq!(map.get(&row, "Date"), Some("2025-06-01"));
        assert_eq!(map.get(&row, "Census"), None);
        assert_eq!(map.get(&row, "Hour"), None);
    }
}
