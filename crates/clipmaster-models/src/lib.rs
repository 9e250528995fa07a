//! Shared data models for the ClipMaster backend.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs and their lifecycle (queued/processing/completed)
//! - Partial job updates applied by the store
//! - Generated clip metadata

pub mod clip;
pub mod job;

// Re-export common types
pub use clip::{Clip, DEFAULT_CLIP_SECONDS, SECOND_CLIP_SECONDS};
pub use job::{
    Job, JobId, JobStatus, JobUpdate, SourceType, ANALYZING_MESSAGE, COMPLETED_MESSAGE,
    INITIAL_PROGRESS, QUEUED_MESSAGE, WORKING_MESSAGE,
};
