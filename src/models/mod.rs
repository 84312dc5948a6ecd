//! Core data models for the staffing engine.
//!
//! This module contains the typed records that flow through the planning
//! pipeline, from census input to the final output tables.

mod census;
mod demand;
mod report;
mod resource;
mod schedule;
mod season;
mod staffing_rule;

pub use census::{CensusRecord, LabeledCensus};
pub use demand::DemandRecord;
pub use report::{DailyBalance, DroppedRows, PlanOutput, RunSummary, SeasonSummaryRow};
pub use resource::{
    ALL_SHIFTS, CapacityAggregate, CapacityMatch, ComparisonRecord, ResourceRecord, split_week,
};
pub use schedule::{
    ScheduleRecord, ShiftBlock, ShiftDays, ShiftNeedRecord, ShiftSource, ShiftTableRow,
    is_weekend, parse_clock_hour, span_hours,
};
pub use season::{Season, SeasonRule};
pub use staffing_rule::{RatioSet, StaffingRule};
