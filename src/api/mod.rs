//! HTTP API module for the cost engine.
//!
//! This module exposes the pure calculation pipeline over REST so a form
//! front end can recompute on every input change.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, GrossUpRequest};
pub use response::{ApiError, ApiErrorResponse, GrossUpResponse};
pub use state::AppState;
