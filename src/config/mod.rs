//! Configuration loading and management for the staffing engine.
//!
//! This module loads the planner settings (season rules and fallback shift
//! blocks) from a YAML file. The resulting [`ConfigLoader`] is handed to the
//! pipeline explicitly at call time.
//!
//! # Example
//!
//! ```no_run
//! use staffing_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/settings.yaml").unwrap();
//! println!("RN has {} fallback shifts", config.shifts_for_role("RN").len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ClockHour, DEFAULT_PLANNING_WEEKS, PlannerConfig, SettingsFile, ShiftBlockConfig,
};
