//! Axum route handlers for job listings.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::listings::engine::filter_and_sort;
use crate::listings::query::{FilterQuery, SortKey, WageBracket};
use crate::listings::view::JobView;
use crate::models::application::Application;
use crate::models::job::Skill;
use crate::notify::{Notification, SubmissionReply};
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Query string of `GET /api/v1/jobs`. `skills` is comma-separated.
///
/// `clear` and `toggle` are applied on top of the other fields, in that order,
/// so a client can send its current query plus one interaction and get the
/// resulting query echoed back with the matches.
#[derive(Debug, Default, Deserialize)]
pub struct ListingsParams {
    pub q: Option<String>,
    pub location: Option<String>,
    pub wage: Option<String>,
    pub skills: Option<String>,
    pub sort: Option<String>,
    #[serde(default)]
    pub clear: bool,
    pub toggle: Option<String>,
}

impl ListingsParams {
    pub fn into_query(self) -> Result<FilterQuery, AppError> {
        let sort_key = match self.sort.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<SortKey>().map_err(AppError::Validation)?,
            _ => SortKey::default(),
        };

        let mut query = FilterQuery {
            search_term: self.q.unwrap_or_default(),
            location_filter: self.location.unwrap_or_default(),
            wage_filter: self.wage.unwrap_or_default(),
            selected_skills: self
                .skills
                .as_deref()
                .map(parse_skill_list)
                .unwrap_or_default(),
            sort_key,
        };

        if self.clear {
            query.clear();
        }
        if let Some(skill) = self.toggle.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.toggle_skill(skill);
        }
        Ok(query)
    }
}

fn parse_skill_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub total: usize,
    pub jobs: Vec<JobView>,
    pub query: FilterQuery,
    pub filtered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub skills: Vec<Skill>,
    pub wage_brackets: Vec<&'static str>,
    pub sort_keys: Vec<SortKey>,
    pub default_sort: SortKey,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
///
/// Recomputes the full result on every call; there is no cached result set.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListingsParams>,
) -> Result<Json<ListingsResponse>, AppError> {
    let query = params.into_query()?;
    let jobs = state.job_source.fetch_jobs().await?;
    let matched = filter_and_sort(&jobs, &query, &state.match_policy());

    let now = Utc::now();
    let views: Vec<JobView> = matched.iter().map(|job| JobView::render(job, now)).collect();

    Ok(Json(ListingsResponse {
        total: views.len(),
        empty_message: views.is_empty().then_some("No jobs found"),
        jobs: views,
        filtered: !query.is_unfiltered(),
        query,
    }))
}

/// GET /api/v1/jobs/filters
pub async fn handle_filter_options() -> Json<FilterOptions> {
    Json(FilterOptions {
        skills: Skill::ALL.to_vec(),
        wage_brackets: WageBracket::OFFERED.to_vec(),
        sort_keys: SortKey::ALL.to_vec(),
        default_sort: SortKey::default(),
    })
}

/// GET /api/v1/jobs/:id
///
/// Drafts and closed postings are only visible to the hirer who owns them.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<Json<JobView>, AppError> {
    let store = state.store.read().await;
    let job = store
        .job(id)
        .filter(|job| job.is_open() || session.user_id() == Some(job.hirer_id))
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    Ok(Json(JobView::render(job, Utc::now())))
}

/// POST /api/v1/jobs/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<SubmissionReply<Application>, AppError> {
    let laborer_id = session.require_laborer()?;
    let title = state
        .store
        .read()
        .await
        .job(id)
        .map(|job| job.title.clone())
        .unwrap_or_default();

    info!("Laborer {laborer_id} applying to job {id}");
    let outcome = state.submitter.submit(id, laborer_id).await;

    Ok(outcome.into_reply(
        StatusCode::CREATED,
        |_| {
            Notification::success(
                "Application Submitted!",
                format!("Your application for \"{title}\" has been sent successfully."),
            )
        },
        "Application not sent",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default_to_empty_query() {
        let query = ListingsParams::default().into_query().unwrap();
        assert_eq!(query, FilterQuery::default());
    }

    #[test]
    fn test_skill_list_is_trimmed_and_deduplicated() {
        let params = ListingsParams {
            skills: Some(" Plumbing, HVAC,,Plumbing ".to_string()),
            ..Default::default()
        };
        let query = params.into_query().unwrap();
        assert_eq!(
            query.selected_skills,
            BTreeSet::from(["HVAC".to_string(), "Plumbing".to_string()])
        );
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let params = ListingsParams {
            sort: Some("cheapest".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let params = ListingsParams {
            skills: Some("Plumbing,HVAC".to_string()),
            toggle: Some("HVAC".to_string()),
            ..Default::default()
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.selected_skills, BTreeSet::from(["Plumbing".to_string()]));

        let params = ListingsParams {
            skills: Some("Plumbing".to_string()),
            toggle: Some("Welding".to_string()),
            ..Default::default()
        };
        assert_eq!(params.into_query().unwrap().selected_skills.len(), 2);
    }

    #[test]
    fn test_clear_resets_before_toggle() {
        let params = ListingsParams {
            q: Some("plumb".to_string()),
            wage: Some("30+".to_string()),
            sort: Some("deadline".to_string()),
            skills: Some("Plumbing".to_string()),
            clear: true,
            toggle: Some("Roofing".to_string()),
            ..Default::default()
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.search_term, "");
        assert_eq!(query.sort_key, SortKey::Newest);
        assert_eq!(query.selected_skills, BTreeSet::from(["Roofing".to_string()]));
    }

    #[test]
    fn test_blank_sort_uses_default() {
        let params = ListingsParams {
            sort: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.into_query().unwrap().sort_key, SortKey::Newest);
    }
}
