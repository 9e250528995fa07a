//! Job store with two interchangeable backings.
//!
//! This crate provides:
//! - A persistent MongoDB backing (`job` collection)
//! - An in-process fallback map for unconfigured deployments
//! - Startup-time backing selection from configuration
//!
//! The backing is a process-wide decision made once at startup from the
//! presence of the database environment variables, never by suppressing
//! connection errors at request time.

pub mod error;
pub mod memory;
pub mod mongo;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::{MongoStore, JOB_COLLECTION};

use tracing::info;

use clipmaster_models::{Job, JobId, JobUpdate};

/// Store configuration read from the environment.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Database connection string (`DATABASE_URL`)
    pub database_url: Option<String>,
    /// Database name (`DATABASE_NAME`)
    pub database_name: Option<String>,
}

impl StoreConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            database_name: std::env::var("DATABASE_NAME").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Whether a persistent database is configured.
    pub fn is_database_configured(&self) -> bool {
        self.database_url.is_some() && self.database_name.is_some()
    }
}

/// The Job Store: one interface, two backings.
pub enum JobStore {
    Memory(MemoryStore),
    Mongo(MongoStore),
}

impl JobStore {
    /// Create an in-memory store (fallback mode, also used by tests).
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Select and build the backing from configuration.
    ///
    /// Both database variables set selects the persistent backing; anything
    /// else selects the in-memory fallback. A malformed connection string is
    /// a startup error, not a silent downgrade.
    pub async fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        match (&config.database_url, &config.database_name) {
            (Some(url), Some(name)) => {
                let store = MongoStore::connect(url, name).await?;
                info!(database = %name, "using persistent job store");
                Ok(Self::Mongo(store))
            }
            _ => {
                info!("no database configured, using in-memory job store");
                Ok(Self::memory())
            }
        }
    }

    /// Short name of the active backing.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Mongo(_) => "mongodb",
        }
    }

    /// Whether jobs survive a process restart.
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Mongo(_))
    }

    /// Insert a job, returning its id.
    pub async fn create(&self, job: Job) -> StoreResult<JobId> {
        match self {
            Self::Memory(store) => Ok(store.create(job).await),
            Self::Mongo(store) => store.create(job).await,
        }
    }

    /// Fetch a job by id; `None` for unknown ids.
    pub async fn get(&self, id: &JobId) -> StoreResult<Option<Job>> {
        match self {
            Self::Memory(store) => Ok(store.get(id).await),
            Self::Mongo(store) => store.get(id).await,
        }
    }

    /// Merge a partial update into the stored job.
    pub async fn update(&self, id: &JobId, update: JobUpdate) -> StoreResult<()> {
        match self {
            Self::Memory(store) => {
                store.update(id, update).await;
                Ok(())
            }
            Self::Mongo(store) => store.update(id, update).await,
        }
    }

    /// Whether the backing is currently reachable. The memory backing is
    /// always reachable.
    pub async fn ping(&self) -> bool {
        match self {
            Self::Memory(_) => true,
            Self::Mongo(store) => store.ping().await.is_ok(),
        }
    }

    /// Backing collection names for the diagnostic endpoint.
    pub async fn collection_names(&self) -> Vec<String> {
        match self {
            Self::Memory(_) => vec![format!("(memory) {JOB_COLLECTION}")],
            Self::Mongo(store) => store.collection_names().await.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipmaster_models::SourceType;

    #[test]
    fn test_config_requires_both_variables() {
        let unset = StoreConfig::default();
        assert!(!unset.is_database_configured());

        let partial = StoreConfig {
            database_url: Some("mongodb://localhost:27017".to_string()),
            database_name: None,
        };
        assert!(!partial.is_database_configured());

        let full = StoreConfig {
            database_url: Some("mongodb://localhost:27017".to_string()),
            database_name: Some("clipmaster".to_string()),
        };
        assert!(full.is_database_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_selects_memory_backing() {
        let store = JobStore::from_config(&StoreConfig::default())
            .await
            .unwrap();
        assert_eq!(store.backend_name(), "memory");
        assert!(!store.is_persistent());
        assert!(store.ping().await);
        assert_eq!(store.collection_names().await, vec!["(memory) job"]);
    }

    #[tokio::test]
    async fn test_memory_backing_roundtrip() {
        let store = JobStore::memory();
        let job = Job::queued(SourceType::File, Some("a.mp4".to_string()), None, "auto", "auto", true);

        let id = store.create(job).await.unwrap();
        let fetched = store.get(&id).await.unwrap().expect("job stored");
        assert_eq!(fetched.original_filename.as_deref(), Some("a.mp4"));
    }
}
