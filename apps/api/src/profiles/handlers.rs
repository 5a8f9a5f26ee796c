//! Axum route handlers for profiles and reviews.

use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Review, Role};
use crate::notify::{Notification, SubmissionError, SubmissionOutcome, SubmissionReply};
use crate::profiles::{
    add_review, public_profile, update_hirer, update_laborer, ProfileView, PublicProfile,
    ReviewForm,
};
use crate::session::Session;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn handle_get_own_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ProfileView>, AppError> {
    let (user_id, role) = session.require_user()?;
    let store = state.store.read().await;

    let profile = match role {
        Role::Laborer => store.laborers.get(&user_id).cloned().map(ProfileView::Laborer),
        Role::Hirer => store.hirers.get(&user_id).cloned().map(ProfileView::Hirer),
    };
    profile
        .map(Json)
        .ok_or_else(|| anyhow!("session user {user_id} has no {role} profile").into())
}

/// PUT /api/v1/profile
///
/// The body shape depends on the caller's role, so it is decoded after the
/// session is known.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<SubmissionReply<ProfileView>, AppError> {
    let (user_id, role) = session.require_user()?;

    let updated = match body {
        Err(rejection) => Err(SubmissionError::from(rejection)),
        Ok(Json(body)) => {
            let mut store = state.store.write().await;
            match role {
                Role::Laborer => decode(body)
                    .and_then(|update| update_laborer(&mut store, user_id, update))
                    .map(ProfileView::Laborer),
                Role::Hirer => decode(body)
                    .and_then(|update| update_hirer(&mut store, user_id, update))
                    .map(ProfileView::Hirer),
            }
        }
    };

    Ok(SubmissionOutcome::from(updated).into_reply(
        StatusCode::OK,
        |_| Notification::success("Profile Updated!", "Your changes have been saved."),
        "Profile not updated",
    ))
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, SubmissionError> {
    serde_json::from_value(body).map_err(|e| SubmissionError::Invalid(e.to_string()))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_public_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicProfile>, AppError> {
    let store = state.store.read().await;
    public_profile(&store, id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))
}

/// POST /api/v1/profiles/:id/reviews
pub async fn handle_add_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    body: Result<Json<ReviewForm>, JsonRejection>,
) -> Result<SubmissionReply<Review>, AppError> {
    let hirer_id = session.require_hirer()?;

    let mut store = state.store.write().await;
    let reviewer = store
        .hirers
        .get(&hirer_id)
        .cloned()
        .ok_or_else(|| anyhow!("session user {hirer_id} has no hirer profile"))?;

    let reviewed = body
        .map_err(SubmissionError::from)
        .and_then(|Json(form)| add_review(&mut store, id, &reviewer, form, Utc::now()));
    let outcome = SubmissionOutcome::from(reviewed);
    Ok(outcome.into_reply(
        StatusCode::CREATED,
        |review| {
            Notification::success(
                "Review Submitted",
                format!("Thanks for rating this laborer {} out of 5.", review.rating),
            )
        },
        "Review not submitted",
    ))
}
