//! Job submission and status polling.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use clipmaster_models::{
    Clip, Job, JobId, JobStatus, JobUpdate, SourceType, ANALYZING_MESSAGE, COMPLETED_MESSAGE,
    WORKING_MESSAGE,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::timeline;

// ============================================================================
// Types
// ============================================================================

/// Response to a successful job submission.
#[derive(Serialize)]
pub struct CreateJobResponse {
    pub job_id: JobId,
}

/// Status poll response. `clips` is empty until completion.
#[derive(Serialize)]
pub struct JobStatusResponse {
    pub status: JobStatus,
    pub progress: u8,
    pub message: String,
    pub clips: Vec<Clip>,
}

/// Raw multipart form fields for a job submission.
#[derive(Debug, Default)]
struct JobForm {
    has_file: bool,
    original_filename: Option<String>,
    source_url: Option<String>,
    sources: Option<String>,
    clip_length: Option<String>,
    aspect_ratio: Option<String>,
    auto_highlights: Option<String>,
}

impl JobForm {
    /// Drain the multipart stream into form fields.
    ///
    /// The uploaded file's bytes are read and discarded; only its presence
    /// and filename are recorded.
    async fn from_multipart(multipart: &mut Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    form.has_file = true;
                    form.original_filename = field.file_name().map(|s| s.to_string());
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid file upload: {e}")))?;
                    debug!(size = bytes.len(), "discarded uploaded file bytes");
                }
                "source_url" => form.source_url = Some(read_text(field).await?),
                "sources" => form.sources = Some(read_text(field).await?),
                "clip_length" => form.clip_length = Some(read_text(field).await?),
                "aspect_ratio" => form.aspect_ratio = Some(read_text(field).await?),
                "auto_highlights" => form.auto_highlights = Some(read_text(field).await?),
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid form field: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// Accept a clipping job (`POST /process`).
pub async fn create_job(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<CreateJobResponse>> {
    let form = JobForm::from_multipart(&mut multipart).await?;

    let links = parse_link_list(form.sources.as_deref(), form.source_url.as_deref());

    if !form.has_file && links.is_empty() {
        return Err(ApiError::bad_request("Provide a file or at least one link"));
    }

    let source_type = if form.has_file {
        SourceType::File
    } else {
        SourceType::Links
    };

    let job = Job::queued(
        source_type,
        form.original_filename,
        matches!(source_type, SourceType::Links).then_some(links),
        form.clip_length.unwrap_or_else(|| "auto".to_string()),
        form.aspect_ratio.unwrap_or_else(|| "auto".to_string()),
        is_truthy(form.auto_highlights.as_deref().unwrap_or("true")),
    );

    let job_id = state.store.create(job).await?;
    info!(%job_id, source_type = source_type.as_str(), "job accepted");

    Ok(Json(CreateJobResponse { job_id }))
}

/// Poll a job's synthetic progress (`GET /status/{job_id}`).
pub async fn job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobStatusResponse>> {
    let id = JobId::from_string(job_id);
    let job = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    let total = state.config.process_seconds as f64;
    let elapsed = job.elapsed_secs();

    if !timeline::is_complete(elapsed, total) {
        let pct = timeline::progress_percent(elapsed, total);
        // Idempotent overwrite on every poll, recomputed from elapsed time
        state
            .store
            .update(
                &id,
                JobUpdate::progress(JobStatus::Processing, pct, ANALYZING_MESSAGE),
            )
            .await?;

        return Ok(Json(JobStatusResponse {
            status: JobStatus::Processing,
            progress: pct,
            message: WORKING_MESSAGE.to_string(),
            clips: Vec::new(),
        }));
    }

    // Window elapsed: materialize the example clips once, then serve the
    // stored record as-is on later polls.
    let job = if job.has_clips() {
        job
    } else {
        let clips = Clip::examples(&job.clip_length, &job.aspect_ratio);
        state
            .store
            .update(&id, JobUpdate::completion(COMPLETED_MESSAGE, clips))
            .await?;
        info!(%id, "job completed, clips materialized");

        state
            .store
            .get(&id)
            .await?
            .ok_or_else(|| ApiError::not_found("Job not found"))?
    };

    Ok(Json(JobStatusResponse {
        status: job.status,
        progress: job.progress,
        message: job.message,
        clips: job.clips.unwrap_or_default(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse the `sources` JSON array leniently and append `source_url` if it is
/// not already present.
///
/// Malformed JSON, non-array values, and non-string elements are silently
/// dropped rather than surfaced as errors.
fn parse_link_list(sources: Option<&str>, source_url: Option<&str>) -> Vec<String> {
    let mut links: Vec<String> = sources
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .and_then(|value| match value {
            serde_json::Value::Array(items) => Some(items),
            _ => None,
        })
        .map(|items| {
            items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    if let Some(url) = source_url {
        if !url.is_empty() && !links.iter().any(|l| l == url) {
            links.push(url.to_string());
        }
    }

    links
}

/// Case-insensitive truthy parse for the `auto_highlights` field.
fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link_list_dedupes_source_url() {
        let links = parse_link_list(
            Some(r#"["https://a","https://b"]"#),
            Some("https://a"),
        );
        assert_eq!(links, vec!["https://a", "https://b"]);
    }

    #[test]
    fn test_parse_link_list_appends_new_source_url() {
        let links = parse_link_list(Some(r#"["https://a"]"#), Some("https://c"));
        assert_eq!(links, vec!["https://a", "https://c"]);
    }

    #[test]
    fn test_parse_link_list_swallows_malformed_json() {
        assert!(parse_link_list(Some("not json"), None).is_empty());
        assert!(parse_link_list(Some(r#"{"a":1}"#), None).is_empty());
    }

    #[test]
    fn test_parse_link_list_drops_non_string_elements() {
        let links = parse_link_list(Some(r#"["https://a", 42, null]"#), None);
        assert_eq!(links, vec!["https://a"]);
    }

    #[test]
    fn test_parse_link_list_ignores_empty_source_url() {
        assert!(parse_link_list(None, Some("")).is_empty());
    }

    #[test]
    fn test_is_truthy_set() {
        for value in ["true", "1", "yes", "on", "On", "TRUE", "Yes"] {
            assert!(is_truthy(value), "{value} should parse as true");
        }
        for value in ["0", "false", "no", "off", "", "enabled"] {
            assert!(!is_truthy(value), "{value} should parse as false");
        }
    }
}
