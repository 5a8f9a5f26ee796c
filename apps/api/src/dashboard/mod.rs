//! Per-role dashboard summaries.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::listings::engine::{filter_and_sort, MatchPolicy};
use crate::listings::query::FilterQuery;
use crate::listings::view::JobView;
use crate::models::job::{JobPosting, PostingStatus};
use crate::models::user::LaborerProfile;
use crate::store::MarketplaceStore;

#[derive(Debug, Serialize)]
pub struct LaborerDashboard {
    pub full_name: String,
    pub applications_sent: usize,
    pub unread_messages: u32,
    pub recommended_jobs: Vec<JobView>,
}

#[derive(Debug, Serialize)]
pub struct PostingSummary {
    #[serde(flatten)]
    pub job: JobView,
    pub applicant_count: usize,
}

#[derive(Debug, Serialize)]
pub struct HirerDashboard {
    pub company_name: String,
    pub active_jobs: usize,
    pub total_applicants: usize,
    pub unread_messages: u32,
    pub postings: Vec<PostingSummary>,
}

/// Postings from `open_jobs` matching any of the laborer's skills, newest
/// first, minus the ones already applied to.
pub fn recommended_jobs(
    open_jobs: &[JobPosting],
    store: &MarketplaceStore,
    laborer: &LaborerProfile,
    policy: &MatchPolicy,
    limit: usize,
) -> Vec<JobPosting> {
    let query = FilterQuery {
        selected_skills: laborer.skills.iter().map(|s| s.as_str().to_string()).collect(),
        ..FilterQuery::default()
    };

    filter_and_sort(open_jobs, &query, policy)
        .into_iter()
        .filter(|job| !store.has_applied(job.id, laborer.id))
        .take(limit)
        .collect()
}

pub fn laborer_dashboard(
    open_jobs: &[JobPosting],
    store: &MarketplaceStore,
    laborer: &LaborerProfile,
    policy: &MatchPolicy,
    limit: usize,
    now: DateTime<Utc>,
) -> LaborerDashboard {
    LaborerDashboard {
        full_name: laborer.full_name.clone(),
        applications_sent: store.applications_by(laborer.id).count(),
        unread_messages: store.unread_for(laborer.id),
        recommended_jobs: recommended_jobs(open_jobs, store, laborer, policy, limit)
            .iter()
            .map(|job| JobView::render(job, now))
            .collect(),
    }
}

pub fn hirer_dashboard(
    store: &MarketplaceStore,
    hirer_id: Uuid,
    company_name: &str,
    now: DateTime<Utc>,
) -> HirerDashboard {
    let mut own: Vec<&JobPosting> = store
        .jobs
        .iter()
        .filter(|job| job.hirer_id == hirer_id)
        .collect();
    own.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));

    let postings: Vec<PostingSummary> = own
        .into_iter()
        .map(|job| PostingSummary {
            job: JobView::render(job, now),
            applicant_count: store.applicant_count(job.id),
        })
        .collect();

    HirerDashboard {
        company_name: company_name.to_string(),
        active_jobs: postings
            .iter()
            .filter(|p| p.job.status == PostingStatus::Active)
            .count(),
        total_applicants: postings.iter().map(|p| p.applicant_count).sum(),
        unread_messages: store.unread_for(hirer_id),
        postings,
    }
}
