//! HTTP API module for the shift roster service.
//!
//! This module provides the REST endpoints for listing, creating,
//! retrieving, updating and deleting employees and shifts.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
