//! HTTP API module for the staffing engine.
//!
//! This module exposes `POST /plan`, which runs the planning pipeline over
//! JSON-encoded input tables against the settings loaded at startup.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CensusRequest, PlanRequest, ResourceRequest, RuleRequest, ShiftRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
