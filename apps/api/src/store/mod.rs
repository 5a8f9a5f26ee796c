//! In-process marketplace state. Nothing here survives a restart.

pub mod seed;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::application::Application;
use crate::models::chat::Conversation;
use crate::models::job::JobPosting;
use crate::models::user::{HirerProfile, LaborerProfile, Review, Role};

pub type SharedStore = Arc<RwLock<MarketplaceStore>>;

#[derive(Debug, Default)]
pub struct MarketplaceStore {
    /// Insertion order; the listings engine decides display order.
    pub jobs: Vec<JobPosting>,
    pub laborers: HashMap<Uuid, LaborerProfile>,
    pub hirers: HashMap<Uuid, HirerProfile>,
    pub applications: Vec<Application>,
    pub reviews: Vec<Review>,
    pub conversations: Vec<Conversation>,
}

impl MarketplaceStore {
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn job(&self, id: Uuid) -> Option<&JobPosting> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn job_mut(&mut self, id: Uuid) -> Option<&mut JobPosting> {
        self.jobs.iter_mut().find(|job| job.id == id)
    }

    pub fn active_jobs(&self) -> Vec<JobPosting> {
        self.jobs.iter().filter(|job| job.is_open()).cloned().collect()
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.laborers
            .values()
            .map(|l| l.email.as_str())
            .chain(self.hirers.values().map(|h| h.email.as_str()))
            .any(|existing| existing.eq_ignore_ascii_case(email))
    }

    /// Display name and role for any account id.
    pub fn identity(&self, user_id: Uuid) -> Option<(String, Role)> {
        if let Some(laborer) = self.laborers.get(&user_id) {
            return Some((laborer.full_name.clone(), Role::Laborer));
        }
        self.hirers
            .get(&user_id)
            .map(|hirer| (hirer.company_name.clone(), Role::Hirer))
    }

    pub fn has_applied(&self, job_id: Uuid, laborer_id: Uuid) -> bool {
        self.applications
            .iter()
            .any(|a| a.job_id == job_id && a.laborer_id == laborer_id)
    }

    pub fn applicant_count(&self, job_id: Uuid) -> usize {
        self.applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .count()
    }

    pub fn applications_by(&self, laborer_id: Uuid) -> impl Iterator<Item = &Application> {
        self.applications
            .iter()
            .filter(move |a| a.laborer_id == laborer_id)
    }

    pub fn reviews_for(&self, laborer_id: Uuid) -> Vec<Review> {
        self.reviews
            .iter()
            .filter(|r| r.laborer_id == laborer_id)
            .cloned()
            .collect()
    }

    pub fn unread_for(&self, user_id: Uuid) -> u32 {
        self.conversations
            .iter()
            .filter(|c| c.includes(user_id))
            .map(|c| c.unread_for(user_id))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::PostingStatus;
    use chrono::Utc;

    fn seeded() -> (MarketplaceStore, seed::DemoAccounts) {
        let mut store = MarketplaceStore::default();
        let accounts = seed::seed(&mut store, Utc::now());
        (store, accounts)
    }

    #[test]
    fn test_seed_contents() {
        let (store, accounts) = seeded();
        assert_eq!(store.jobs.len(), 4);
        assert_eq!(store.hirers.len(), 4);
        assert_eq!(store.reviews_for(accounts.laborer_id).len(), 3);
        assert_eq!(store.unread_for(accounts.laborer_id), 1);
        assert_eq!(store.unread_for(accounts.hirer_id), 0);
    }

    #[test]
    fn test_active_jobs_skip_drafts_and_closed() {
        let (mut store, _) = seeded();
        store.jobs[0].status = PostingStatus::Draft;
        store.jobs[1].status = PostingStatus::Closed;
        assert_eq!(store.active_jobs().len(), 2);
    }

    #[test]
    fn test_email_taken_is_case_insensitive() {
        let (store, _) = seeded();
        assert!(store.email_taken("John.Smith@Email.com"));
        assert!(store.email_taken("sarah@buildcorp.com"));
        assert!(!store.email_taken("nobody@example.com"));
    }

    #[test]
    fn test_identity_resolves_both_roles() {
        let (store, accounts) = seeded();
        assert_eq!(
            store.identity(accounts.laborer_id),
            Some(("John Smith".to_string(), Role::Laborer))
        );
        assert_eq!(
            store.identity(accounts.hirer_id),
            Some(("BuildCorp LLC".to_string(), Role::Hirer))
        );
        assert_eq!(store.identity(Uuid::new_v4()), None);
    }
}
