//! Web layer for the imsyakiyah server.
//!
//! Provides read-only JSON endpoints for states, cities and schedules.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
