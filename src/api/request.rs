//! Request types for the staffing engine API.
//!
//! This module defines the JSON request structures for the `/plan` endpoint.
//! Rows mirror the columns of the input tables.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ClockHour;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ALL_SHIFTS, CensusRecord, DroppedRows, RatioSet, ResourceRecord, Season, ShiftBlock,
    ShiftDays, ShiftTableRow, StaffingRule,
};
use crate::planning::{PlanInputs, PlanOptions};

/// Request body for the `/plan` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Census observations.
    pub census: Vec<CensusRequest>,
    /// Staffing ratio rules.
    pub rules: Vec<RuleRequest>,
    /// Available staff.
    pub resources: Vec<ResourceRequest>,
    /// Explicit shift blocks; omitted or empty uses the server's settings.
    #[serde(default)]
    pub shifts: Vec<ShiftRequest>,
    /// Season to force onto every census record (Low, Medium or High).
    #[serde(default)]
    pub season_override: Option<String>,
    /// Name recorded in the run summary.
    #[serde(default)]
    pub source_name: Option<String>,
}

/// One census row in a plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensusRequest {
    /// The calendar date.
    pub date: NaiveDate,
    /// Hour of day; defaults to 0.
    #[serde(default)]
    pub hour: u8,
    /// Patient count.
    pub census: Decimal,
}

impl CensusRequest {
    /// Converts the row, or `None` if the hour is not 0-23 or the census is
    /// negative.
    pub fn into_record(self) -> Option<CensusRecord> {
        if self.hour > 23 || self.census < Decimal::ZERO {
            return None;
        }
        Some(CensusRecord::new(self.date, self.hour, self.census))
    }
}

/// One staffing rule in a plan request, in full or simplified form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRequest {
    /// Department; empty for role-only rules.
    #[serde(default)]
    pub department: String,
    /// Role staffed by the rule.
    pub role: String,
    /// Shift; defaults to `All`.
    #[serde(default = "default_shift")]
    pub shift: String,
    /// Ratio in High season.
    #[serde(default)]
    pub ratio_high: Option<Decimal>,
    /// Ratio in Medium season.
    #[serde(default)]
    pub ratio_medium: Option<Decimal>,
    /// Ratio in Low season.
    #[serde(default)]
    pub ratio_low: Option<Decimal>,
    /// Ratio used for any season without its own.
    #[serde(default)]
    pub ratio: Option<Decimal>,
}

fn default_shift() -> String {
    ALL_SHIFTS.to_string()
}

impl From<RuleRequest> for StaffingRule {
    fn from(req: RuleRequest) -> Self {
        let ratios = RatioSet {
            high: req.ratio_high.or(req.ratio),
            medium: req.ratio_medium.or(req.ratio),
            low: req.ratio_low.or(req.ratio),
        };
        StaffingRule::new(
            req.department.trim(),
            req.role.trim(),
            req.shift.trim(),
            ratios,
        )
    }
}

/// One resource row in a plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRequest {
    /// Department.
    pub department: String,
    /// Role.
    pub role: String,
    /// Person or position name.
    #[serde(default)]
    pub name: String,
    /// Full-time equivalents.
    pub fte: Decimal,
    /// Assigned shift; omitted means any shift.
    #[serde(default)]
    pub shift: Option<String>,
    /// First day of planned leave.
    #[serde(default)]
    pub leave_start: Option<NaiveDate>,
    /// Last day of planned leave.
    #[serde(default)]
    pub leave_end: Option<NaiveDate>,
}

impl ResourceRequest {
    /// Converts the row, or `None` if the role is blank or the FTE is
    /// negative.
    pub fn into_record(self) -> Option<ResourceRecord> {
        let department = self.department.trim();
        let role = self.role.trim();
        if role.is_empty() || self.fte < Decimal::ZERO {
            return None;
        }
        Some(ResourceRecord {
            department: department.to_string(),
            role: role.to_string(),
            name: self.name,
            fte: self.fte,
            shift: self.shift,
            start: None,
            end: None,
            leave_start: self.leave_start,
            leave_end: self.leave_end,
        })
    }
}

/// One explicit shift block in a plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Role the block is limited to; omitted means every role.
    #[serde(default)]
    pub role: Option<String>,
    /// Label of the block.
    pub name: String,
    /// Start hour, as a number or `"HH:MM"`.
    pub start: ClockHour,
    /// End hour, as a number or `"HH:MM"`.
    pub end: ClockHour,
    /// Paid duration; defaults to the span.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Weekday, Weekend or (default) every day.
    #[serde(default)]
    pub days: ShiftDays,
}

impl TryFrom<ShiftRequest> for ShiftTableRow {
    type Error = EngineError;

    fn try_from(req: ShiftRequest) -> EngineResult<Self> {
        let hour = |value: &ClockHour, field: &str| {
            value.resolve().ok_or_else(|| EngineError::InvalidShift {
                shift: req.name.clone(),
                message: format!("{} '{}' is not an hour of the day", field, value),
            })
        };
        let start = hour(&req.start, "start")?;
        let end = hour(&req.end, "end")?;

        let block = ShiftBlock::new(req.name.trim(), start, end).on_days(req.days);
        Ok(ShiftTableRow {
            role: req.role.map(|role| role.trim().to_string()),
            block: match req.hours {
                Some(hours) => block.with_hours(hours),
                None => block,
            },
        })
    }
}

impl PlanRequest {
    /// Converts the request into pipeline inputs and options.
    ///
    /// Census rows outside hour 0-23 or with a negative count, and resource
    /// rows without a role or with a negative FTE, are dropped and counted in
    /// the options, the same as when reading CSV.
    ///
    /// # Errors
    ///
    /// `UnknownSeason` for an unrecognised override and `InvalidShift` for a
    /// block whose start or end is not an hour of the day.
    pub fn into_plan(self) -> EngineResult<(PlanInputs, PlanOptions)> {
        let season_override = self
            .season_override
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(Season::from_str)
            .transpose()?;

        let shift_table = self
            .shifts
            .into_iter()
            .map(ShiftTableRow::try_from)
            .collect::<EngineResult<Vec<_>>>()?;

        let census_rows = self.census.len();
        let census: Vec<CensusRecord> = self
            .census
            .into_iter()
            .filter_map(CensusRequest::into_record)
            .collect();
        let resource_rows = self.resources.len();
        let resources: Vec<ResourceRecord> = self
            .resources
            .into_iter()
            .filter_map(ResourceRequest::into_record)
            .collect();

        let dropped_rows = DroppedRows {
            census: census_rows - census.len(),
            resources: resource_rows - resources.len(),
            ..DroppedRows::default()
        };
        if dropped_rows.total() > 0 {
            warn!(
                census = dropped_rows.census,
                resources = dropped_rows.resources,
                "Dropped invalid request rows"
            );
        }

        let inputs = PlanInputs {
            census,
            rules: self.rules.into_iter().map(Into::into).collect(),
            resources,
            shift_table,
        };
        let options = PlanOptions {
            season_override,
            input_name: self.source_name.unwrap_or_else(|| "request".to_string()),
            run_date: None,
            dropped_rows,
        };
        Ok((inputs, options))
    }
}
