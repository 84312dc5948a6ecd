//! Planning logic for the staffing engine.
//!
//! This module holds the four pipeline stages (season labelling, demand
//! planning, capacity reconciliation and shift allocation), the reports
//! derived from them, and [`run_pipeline`] which chains them together.

mod capacity;
mod demand_planner;
mod pipeline;
mod season_labeler;
mod shift_allocator;
mod shift_coverage;
mod summary;

pub use capacity::{CapacityIndex, build_capacity, compare_plan_vs_capacity, compare_slot};
pub use demand_planner::{build_demand_plan, staff_needed, validate_rules};
pub use pipeline::{PlanInputs, PlanOptions, run_pipeline};
pub use season_labeler::{label_census, label_season, season_for_date};
pub use shift_allocator::{
    Allocation, ResolvedShifts, ShiftResolver, assign_staff_to_shifts, distribute, group_demand,
};
pub use shift_coverage::{CoverageReport, block_for_hour, check_shift_coverage, consolidate_to_shifts};
pub use summary::{RunContext, daily_balance, run_summary, season_summary};
