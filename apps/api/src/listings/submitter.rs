//! Where "Apply Now" goes. Swappable behind `Arc<dyn ApplicationSubmitter>`.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::models::application::Application;
use crate::notify::{SubmissionError, SubmissionOutcome};
use crate::store::SharedStore;

#[async_trait]
pub trait ApplicationSubmitter: Send + Sync {
    async fn submit(&self, job_id: Uuid, laborer_id: Uuid) -> SubmissionOutcome<Application>;
}

/// Records applications in the in-memory store.
pub struct StoreApplicationSubmitter {
    store: SharedStore,
}

impl StoreApplicationSubmitter {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ApplicationSubmitter for StoreApplicationSubmitter {
    async fn submit(&self, job_id: Uuid, laborer_id: Uuid) -> SubmissionOutcome<Application> {
        let mut store = self.store.write().await;

        let Some(job) = store.job(job_id) else {
            return SubmissionOutcome::Failure(SubmissionError::NotFound(format!(
                "Job {job_id} not found"
            )));
        };
        if !job.is_open() {
            return SubmissionOutcome::Failure(SubmissionError::Conflict(format!(
                "\"{}\" is no longer accepting applications",
                job.title
            )));
        }
        if store.has_applied(job_id, laborer_id) {
            return SubmissionOutcome::Failure(SubmissionError::Conflict(format!(
                "You have already applied to \"{}\"",
                job.title
            )));
        }

        let application = Application::new(job_id, laborer_id, Utc::now());
        store.applications.push(application.clone());
        info!(
            "Application {} recorded: job={} laborer={}",
            application.id, job_id, laborer_id
        );
        SubmissionOutcome::Success(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::PostingStatus;
    use crate::store::{seed, MarketplaceStore};

    async fn fixture() -> (StoreApplicationSubmitter, SharedStore, Uuid, Uuid) {
        let mut store = MarketplaceStore::default();
        let accounts = seed::seed(&mut store, Utc::now());
        let job_id = store.jobs[0].id;
        let shared = store.into_shared();
        (
            StoreApplicationSubmitter::new(shared.clone()),
            shared,
            job_id,
            accounts.laborer_id,
        )
    }

    #[tokio::test]
    async fn test_first_application_succeeds() {
        let (submitter, store, job_id, laborer_id) = fixture().await;
        let outcome = submitter.submit(job_id, laborer_id).await;
        assert!(matches!(outcome, SubmissionOutcome::Success(_)));
        assert_eq!(store.read().await.applicant_count(job_id), 1);
    }

    #[tokio::test]
    async fn test_duplicate_application_conflicts() {
        let (submitter, store, job_id, laborer_id) = fixture().await;
        submitter.submit(job_id, laborer_id).await;
        let outcome = submitter.submit(job_id, laborer_id).await;
        assert!(matches!(
            outcome,
            SubmissionOutcome::Failure(SubmissionError::Conflict(_))
        ));
        assert_eq!(store.read().await.applicant_count(job_id), 1);
    }

    #[tokio::test]
    async fn test_closed_posting_rejects() {
        let (submitter, store, job_id, laborer_id) = fixture().await;
        if let Some(job) = store.write().await.job_mut(job_id) {
            job.status = PostingStatus::Closed;
        }
        let outcome = submitter.submit(job_id, laborer_id).await;
        assert!(matches!(
            outcome,
            SubmissionOutcome::Failure(SubmissionError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let (submitter, _, _, laborer_id) = fixture().await;
        let outcome = submitter.submit(Uuid::new_v4(), laborer_id).await;
        assert!(matches!(
            outcome,
            SubmissionOutcome::Failure(SubmissionError::NotFound(_))
        ));
    }
}
