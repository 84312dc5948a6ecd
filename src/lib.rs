//! Staffing Engine for hospital units
//!
//! This crate turns patient census and staffing ratios into a staffing plan,
//! reconciles the plan against available staff, and distributes the planned
//! headcount across shift blocks.
//!
//! The pipeline runs in four stages: season labelling, demand planning,
//! capacity reconciliation and shift allocation. [`planning::run_pipeline`]
//! chains them; [`ingest`] and [`export`] read and write the CSV tables at
//! either end, and [`api`] serves the pipeline over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod planning;
