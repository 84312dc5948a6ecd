//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the planner
//! settings from a YAML file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{SeasonRule, ShiftBlock, ShiftDays};
use crate::planning::{CoverageReport, check_shift_coverage};

use super::types::{PlannerConfig, SettingsFile, ShiftBlockConfig};

/// Loads and provides access to planner configuration.
///
/// # File Structure
///
/// ```text
/// planning_weeks: 6     # leave cycle, defaults to 6
/// seasons:              # ordered, first match wins
///   - months: [6, 7, 8]
///     weekdays: [0, 1, 2, 3, 4, 5, 6]
///     season: High
/// shifts:               # fallback blocks per role
///   RN:
///     - { name: Day, start: "07:00", end: "19:00", hours: 12 }
///     - { name: Night, start: "19:00", end: "07:00", hours: 12 }
///     - { name: Long Day, start: 7, end: 7, days: Weekend }
/// ```
///
/// # Example
///
/// ```no_run
/// use staffing_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/settings.yaml")?;
/// println!("{} season rules", loader.season_rules().len());
/// # Ok::<(), staffing_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PlannerConfig,
    origin: String,
}

impl ConfigLoader {
    /// Loads configuration from the specified settings file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A month, weekday or shift hour is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let settings: SettingsFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let config = Self::validate(settings)?;
        let loader = Self {
            config,
            origin: origin.to_string(),
        };

        for (role, report) in loader.coverage_issues() {
            warn!(
                origin = %loader.origin,
                role = %role,
                uncovered_hours = ?report.uncovered,
                overlapping_hours = ?report.overlapping,
                "Fallback shift blocks do not tile the day"
            );
        }

        Ok(loader)
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: PlannerConfig) -> Self {
        Self {
            config,
            origin: "<memory>".to_string(),
        }
    }

    fn validate(settings: SettingsFile) -> EngineResult<PlannerConfig> {
        if settings.planning_weeks == 0 {
            return Err(EngineError::InvalidConfig {
                message: "planning_weeks must be at least 1".to_string(),
            });
        }

        for (index, rule) in settings.seasons.iter().enumerate() {
            Self::validate_season_rule(index, rule)?;
        }

        let mut shifts = BTreeMap::new();
        for (role, blocks) in settings.shifts {
            let resolved = blocks
                .iter()
                .map(|block| Self::resolve_block(&role, block))
                .collect::<EngineResult<Vec<_>>>()?;
            shifts.insert(role, resolved);
        }

        Ok(PlannerConfig::new(settings.seasons, shifts)
            .with_planning_weeks(settings.planning_weeks))
    }

    fn validate_season_rule(index: usize, rule: &SeasonRule) -> EngineResult<()> {
        if let Some(month) = rule.months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(EngineError::InvalidConfig {
                message: format!("season rule {} has month {} outside 1-12", index, month),
            });
        }
        if let Some(day) = rule.weekdays.iter().find(|d| **d > 6) {
            return Err(EngineError::InvalidConfig {
                message: format!("season rule {} has weekday {} outside 0-6", index, day),
            });
        }
        Ok(())
    }

    fn resolve_block(role: &str, block: &ShiftBlockConfig) -> EngineResult<ShiftBlock> {
        let hour = |value: &super::types::ClockHour, field: &str| {
            value.resolve().ok_or_else(|| EngineError::InvalidConfig {
                message: format!(
                    "shift '{}' for role '{}' has {} '{}' outside 00:00-23:59",
                    block.name, role, field, value
                ),
            })
        };
        let start = hour(&block.start, "start")?;
        let end = hour(&block.end, "end")?;

        let resolved = ShiftBlock::new(block.name.trim(), start, end).on_days(block.days);
        Ok(match block.hours {
            Some(hours) => resolved.with_hours(hours),
            None => resolved,
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Returns the source the configuration was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the season rules in evaluation order.
    pub fn season_rules(&self) -> &[SeasonRule] {
        self.config.season_rules()
    }

    /// Returns the fallback shift blocks for a role.
    pub fn shifts_for_role(&self, role: &str) -> &[ShiftBlock] {
        self.config.shifts_for_role(role)
    }

    /// Lists roles whose fallback blocks leave hours uncovered or overlap.
    ///
    /// Roles with weekday- or weekend-only blocks are checked once per day
    /// type and reported as e.g. `"RN (Weekend)"`.
    pub fn coverage_issues(&self) -> Vec<(String, CoverageReport)> {
        let mut issues = Vec::new();
        for (role, blocks) in self.config.shifts() {
            if blocks.iter().all(|b| b.days == ShiftDays::Every) {
                issues.push((role.clone(), check_shift_coverage(blocks)));
                continue;
            }
            for days in [ShiftDays::Weekday, ShiftDays::Weekend] {
                let worked: Vec<ShiftBlock> = blocks
                    .iter()
                    .filter(|b| b.days == ShiftDays::Every || b.days == days)
                    .cloned()
                    .collect();
                issues.push((format!("{} ({})", role, days), check_shift_coverage(&worked)));
            }
        }
        issues.retain(|(_, report)| !report.is_clean());
        issues
    }
}
