//! Error types for the staffing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts a planning run. Data-quality gaps in
//! individual rows are not errors; they are absorbed where they occur.

use thiserror::Error;

/// The main error type for the staffing engine.
///
/// Validation errors abort the run before any output is produced.
///
/// # Example
///
/// ```
/// use staffing_engine::error::EngineError;
///
/// let error = EngineError::MissingColumns {
///     table: "Staffing Grid".to_string(),
///     missing: vec!["Role".to_string(), "Ratio".to_string()],
/// };
/// assert_eq!(
///     error.to_string(),
///     "Staffing Grid is missing required columns: Role, Ratio"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values outside their allowed range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the offending value.
        message: String,
    },

    /// An input table lacks columns the planner cannot work without.
    #[error("{table} is missing required columns: {}", .missing.join(", "))]
    MissingColumns {
        /// The logical table (e.g. "Census Input").
        table: String,
        /// Canonical names of the missing columns.
        missing: Vec<String>,
    },

    /// A staffing rule lacks its identifying fields.
    #[error("Invalid staffing rule at position {index}: {message}")]
    InvalidStaffingRule {
        /// Zero-based position of the rule in its table.
        index: usize,
        /// What is wrong with the rule.
        message: String,
    },

    /// A shift block has a start or end that is not an hour of the day.
    #[error("Invalid shift '{shift}': {message}")]
    InvalidShift {
        /// Label of the offending shift block.
        shift: String,
        /// What is wrong with the block.
        message: String,
    },

    /// A season label outside Low/Medium/High was requested.
    #[error("Unknown season '{label}': expected one of Low, Medium, High")]
    UnknownSeason {
        /// The label as supplied.
        label: String,
    },

    /// An input table could not be read at all.
    #[error("Failed to read {source_name}: {message}")]
    InputRead {
        /// The table or file being read.
        source_name: String,
        /// The underlying reader error.
        message: String,
    },

    /// An output table could not be written.
    #[error("Failed to write '{path}': {message}")]
    ExportFailed {
        /// The destination path.
        path: String,
        /// The underlying writer error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
