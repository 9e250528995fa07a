//! Axum HTTP API server.
//!
//! This crate provides:
//! - Job submission and status polling over a simulated timeline
//! - Diagnostic endpoint reporting store configuration
//! - Startup-time store selection (persistent vs. in-memory)

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod timeline;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
