//! MongoDB-backed job store.
//!
//! Jobs live in the `job` collection of the configured database, keyed by
//! the generated job id under `_id`. Updates are partial `$set` merges.

use mongodb::bson::{doc, to_document};
use mongodb::{Client, Collection, Database};
use tracing::debug;

use clipmaster_models::{Job, JobId, JobUpdate};

use crate::error::StoreResult;

/// Name of the backing collection.
pub const JOB_COLLECTION: &str = "job";

/// Persistent job store over a MongoDB collection.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect with the given connection string and database name.
    ///
    /// The driver connects lazily; a malformed connection string fails here,
    /// while an unreachable server only surfaces on first use (observed via
    /// [`MongoStore::ping`]).
    pub async fn connect(url: &str, db_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(url).await?;
        Ok(Self {
            db: client.database(db_name),
        })
    }

    fn jobs(&self) -> Collection<Job> {
        self.db.collection(JOB_COLLECTION)
    }

    /// Insert a job, returning its id.
    pub async fn create(&self, job: Job) -> StoreResult<JobId> {
        let id = job.id.clone();
        self.jobs().insert_one(&job).await?;
        debug!(job_id = %id, "inserted job document");
        Ok(id)
    }

    /// Fetch a job by id.
    pub async fn get(&self, id: &JobId) -> StoreResult<Option<Job>> {
        let job = self.jobs().find_one(doc! { "_id": id.as_str() }).await?;
        Ok(job)
    }

    /// `$set`-merge the update into the stored document. Unknown ids match
    /// nothing and are a no-op.
    pub async fn update(&self, id: &JobId, update: JobUpdate) -> StoreResult<()> {
        let fields = to_document(&update)?;
        self.jobs()
            .update_one(doc! { "_id": id.as_str() }, doc! { "$set": fields })
            .await?;
        Ok(())
    }

    /// Round-trip a ping command to verify connectivity.
    pub async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// List collection names in the backing database.
    pub async fn collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }
}
