//! In-process fallback store.
//!
//! Used when no database is configured. Jobs live in a single shared map
//! for the lifetime of the process; they do not survive restarts and are
//! not shared across worker processes.

use std::collections::HashMap;

use tokio::sync::RwLock;

use clipmaster_models::{Job, JobId, JobUpdate};

/// Process-scoped in-memory job map.
pub struct MemoryStore {
    jobs: RwLock<HashMap<String, Job>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a job, returning its id.
    pub async fn create(&self, job: Job) -> JobId {
        let id = job.id.clone();
        self.jobs.write().await.insert(id.as_str().to_string(), job);
        id
    }

    /// Fetch a job by id.
    pub async fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.read().await.get(id.as_str()).cloned()
    }

    /// Merge the update into the stored job. Unknown ids are a no-op.
    pub async fn update(&self, id: &JobId, update: JobUpdate) {
        if let Some(job) = self.jobs.write().await.get_mut(id.as_str()) {
            update.apply(job);
        }
    }

    /// Number of stored jobs.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipmaster_models::{Clip, JobStatus, SourceType, COMPLETED_MESSAGE};

    fn sample_job() -> Job {
        Job::queued(
            SourceType::Links,
            None,
            Some(vec!["https://example.com/v".to_string()]),
            "auto",
            "auto",
            true,
        )
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStore::new();
        let id = store.create(sample_job()).await;

        let job = store.get(&id).await.expect("job should be stored");
        assert_eq!(job.id, id);
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_absent() {
        let store = MemoryStore::new();
        assert!(store.get(&JobId::from_string("missing")).await.is_none());
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let store = MemoryStore::new();
        let id = store.create(sample_job()).await;

        store
            .update(
                &id,
                JobUpdate::completion(COMPLETED_MESSAGE, Clip::examples("auto", "auto")),
            )
            .await;

        let job = store.get(&id).await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert!(job.has_clips());
        // Fields outside the update are untouched
        assert_eq!(job.sources.as_deref().map(|s| s.len()), Some(1));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let store = MemoryStore::new();
        store
            .update(
                &JobId::from_string("missing"),
                JobUpdate::progress(JobStatus::Processing, 50, "working"),
            )
            .await;
        assert_eq!(store.len().await, 0);
    }
}
