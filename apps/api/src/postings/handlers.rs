use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::listings::view::JobView;
use crate::models::job::PostingStatus;
use crate::notify::{Notification, SubmissionError, SubmissionOutcome, SubmissionReply};
use crate::postings::{build_posting, transition, PostJobForm};
use crate::session::Session;
use crate::state::AppState;

/// POST /api/v1/jobs
pub async fn handle_post_job(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<PostJobForm>, JsonRejection>,
) -> Result<SubmissionReply<JobView>, AppError> {
    let hirer_id = session.require_hirer()?;
    let now = Utc::now();

    let mut store = state.store.write().await;
    let hirer = store
        .hirers
        .get(&hirer_id)
        .ok_or_else(|| anyhow!("session user {hirer_id} has no hirer profile"))?;

    let built = body
        .map_err(SubmissionError::from)
        .and_then(|Json(form)| build_posting(form, hirer, now));

    let outcome = match built {
        Ok(job) => {
            info!("Hirer {hirer_id} created job {} ({:?})", job.id, job.status);
            let view = JobView::render(&job, now);
            store.jobs.push(job);
            SubmissionOutcome::Success(view)
        }
        Err(reason) => SubmissionOutcome::Failure(reason),
    };

    Ok(outcome.into_reply(
        StatusCode::CREATED,
        |view| match view.status {
            PostingStatus::Draft => Notification::success(
                "Draft Saved",
                format!("\"{}\" was saved as a draft.", view.title),
            ),
            _ => Notification::success(
                "Job Posted!",
                format!("\"{}\" is now visible to laborers.", view.title),
            ),
        },
        "Job not posted",
    ))
}

/// POST /api/v1/jobs/:id/publish
pub async fn handle_publish_job(
    state: State<AppState>,
    id: Path<Uuid>,
    session: Session,
) -> Result<SubmissionReply<JobView>, AppError> {
    change_status(state, id, session, PostingStatus::Active).await
}

/// POST /api/v1/jobs/:id/close
pub async fn handle_close_job(
    state: State<AppState>,
    id: Path<Uuid>,
    session: Session,
) -> Result<SubmissionReply<JobView>, AppError> {
    change_status(state, id, session, PostingStatus::Closed).await
}

async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    target: PostingStatus,
) -> Result<SubmissionReply<JobView>, AppError> {
    let hirer_id = session.require_hirer()?;
    let now = Utc::now();

    let mut store = state.store.write().await;
    let job = store
        .job_mut(id)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    if job.hirer_id != hirer_id {
        return Err(AppError::Forbidden(
            "Only the hirer who posted this job can change it".to_string(),
        ));
    }

    let outcome: SubmissionOutcome<JobView> = transition(job, target, now)
        .map(|()| {
            info!("Job {id} is now {target:?}");
            JobView::render(job, now)
        })
        .into();

    Ok(outcome.into_reply(
        StatusCode::OK,
        |view| match target {
            PostingStatus::Closed => Notification::success(
                "Job Closed",
                format!("\"{}\" no longer accepts applications.", view.title),
            ),
            _ => Notification::success(
                "Job Published!",
                format!("\"{}\" is now visible to laborers.", view.title),
            ),
        },
        "Status not changed",
    ))
}
