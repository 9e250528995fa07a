//! Request handlers.

pub mod health;
pub mod jobs;

pub use health::{diagnostics, root};
pub use jobs::{create_job, job_status};
