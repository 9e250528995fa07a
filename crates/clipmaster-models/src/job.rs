//! Job record and lifecycle types.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::Clip;

/// Progress assigned to a freshly created job.
pub const INITIAL_PROGRESS: u8 = 10;

/// Message stored on a freshly created job.
pub const QUEUED_MESSAGE: &str = "Queued for processing";

/// Message persisted on every poll while the simulated timeline runs.
pub const ANALYZING_MESSAGE: &str = "Analyzing scenes, audio and generating captions…";

/// Message returned to the caller while the simulated timeline runs.
pub const WORKING_MESSAGE: &str = "Working on your highlights…";

/// Message set once the simulated timeline finishes.
pub const COMPLETED_MESSAGE: &str = "All done! Your clips are ready.";

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job processing status.
///
/// `Failed` is part of the persisted schema but no current code path
/// produces it; it is reserved for a real processing error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job accepted, timeline not yet polled
    #[default]
    Queued,
    /// Simulated timeline is running
    Processing,
    /// Timeline elapsed, clips materialized
    Completed,
    /// Declared but never produced by current logic
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the job's source material came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// An uploaded file (bytes discarded, filename recorded)
    File,
    /// A list of source links
    Links,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::File => "file",
            SourceType::Links => "links",
        }
    }
}

/// A clipping job as persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Unique job ID (document key)
    #[serde(rename = "_id")]
    pub id: JobId,

    /// Current status
    pub status: JobStatus,

    /// Progress (0-100)
    pub progress: u8,

    /// Human-readable status message
    pub message: String,

    /// Source kind (file upload vs. links)
    pub source_type: SourceType,

    /// Filename of the uploaded file, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,

    /// Ordered source URLs, present only for link jobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,

    /// Requested clip length ("auto" or a numeric-string duration)
    pub clip_length: String,

    /// Requested aspect ratio ("auto" or a ratio label)
    pub aspect_ratio: String,

    /// Whether automatic highlight selection was requested
    pub auto_highlights: bool,

    /// Generated clips, absent until completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clips: Option<Vec<Clip>>,

    /// Error message (schema slot for a future failure path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Creation timestamp; the simulated timeline derives from it
    pub created_ts: DateTime<Utc>,
}

impl Job {
    /// Create a freshly queued job.
    pub fn queued(
        source_type: SourceType,
        original_filename: Option<String>,
        sources: Option<Vec<String>>,
        clip_length: impl Into<String>,
        aspect_ratio: impl Into<String>,
        auto_highlights: bool,
    ) -> Self {
        Self {
            id: JobId::new(),
            status: JobStatus::Queued,
            progress: INITIAL_PROGRESS,
            message: QUEUED_MESSAGE.to_string(),
            source_type,
            original_filename,
            sources,
            clip_length: clip_length.into(),
            aspect_ratio: aspect_ratio.into(),
            auto_highlights,
            clips: None,
            error: None,
            created_ts: Utc::now(),
        }
    }

    /// Seconds elapsed since creation, clamped to be non-negative.
    pub fn elapsed_secs(&self) -> f64 {
        let millis = (Utc::now() - self.created_ts).num_milliseconds().max(0);
        millis as f64 / 1000.0
    }

    /// Whether clips have been materialized for this job.
    pub fn has_clips(&self) -> bool {
        self.clips.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Partial update merged into a stored job.
///
/// Absent fields are skipped on serialization so the record maps directly
/// to a `$set` document on the persistent backing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct JobUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clips: Option<Vec<Clip>>,
}

impl JobUpdate {
    /// Update for an in-flight poll: status, progress, and stored message.
    pub fn progress(status: JobStatus, progress: u8, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            progress: Some(progress),
            message: Some(message.into()),
            clips: None,
        }
    }

    /// Update that completes a job with its materialized clips.
    pub fn completion(message: impl Into<String>, clips: Vec<Clip>) -> Self {
        Self {
            status: Some(JobStatus::Completed),
            progress: Some(100),
            message: Some(message.into()),
            clips: Some(clips),
        }
    }

    /// Merge the present fields into an existing job.
    pub fn apply(self, job: &mut Job) {
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(progress) = self.progress {
            job.progress = progress;
        }
        if let Some(message) = self.message {
            job.message = message;
        }
        if let Some(clips) = self.clips {
            job.clips = Some(clips);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_job_defaults() {
        let job = Job::queued(
            SourceType::Links,
            None,
            Some(vec!["https://example.com/v".to_string()]),
            "auto",
            "auto",
            true,
        );

        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.progress, INITIAL_PROGRESS);
        assert_eq!(job.message, QUEUED_MESSAGE);
        assert!(!job.has_clips());
        assert!(job.elapsed_secs() >= 0.0);
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Queued).unwrap(),
            "\"queued\""
        );
        assert_eq!(
            serde_json::to_string(&JobStatus::Failed).unwrap(),
            "\"failed\""
        );
        assert!(JobStatus::Completed.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let mut job = Job::queued(SourceType::File, Some("demo.mp4".to_string()), None, "45", "9:16", false);

        JobUpdate::progress(JobStatus::Processing, 55, ANALYZING_MESSAGE).apply(&mut job);
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.progress, 55);
        assert_eq!(job.message, ANALYZING_MESSAGE);
        assert!(job.clips.is_none());
        // Untouched fields survive the merge
        assert_eq!(job.original_filename.as_deref(), Some("demo.mp4"));
        assert_eq!(job.clip_length, "45");
    }

    #[test]
    fn test_completion_update_sets_clips() {
        let mut job = Job::queued(SourceType::File, None, None, "auto", "auto", true);

        let clips = Clip::examples(&job.clip_length, &job.aspect_ratio);
        JobUpdate::completion(COMPLETED_MESSAGE, clips).apply(&mut job);

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert!(job.has_clips());
    }

    #[test]
    fn test_job_roundtrips_through_json() {
        let job = Job::queued(
            SourceType::Links,
            None,
            Some(vec!["https://a".to_string(), "https://b".to_string()]),
            "30",
            "16:9",
            false,
        );

        let encoded = serde_json::to_string(&job).unwrap();
        // The identifier is persisted under the document key
        assert!(encoded.contains("\"_id\""));

        let decoded: Job = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.id, job.id);
        assert_eq!(decoded.sources, job.sources);
        assert_eq!(decoded.created_ts, job.created_ts);
    }
}
