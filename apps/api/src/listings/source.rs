//! Upstream supplier of postings for the listings engine.
//!
//! `AppState` holds an `Arc<dyn JobSource>`; the default reads the in-memory
//! store. A remote-backed source reports failures as `AppError::FetchFailed`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::store::SharedStore;

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Every posting currently open for applications, already validated.
    async fn fetch_jobs(&self) -> Result<Vec<JobPosting>, AppError>;
}

pub struct StoreJobSource {
    store: SharedStore,
}

impl StoreJobSource {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobSource for StoreJobSource {
    async fn fetch_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        Ok(self.store.read().await.active_jobs())
    }
}
