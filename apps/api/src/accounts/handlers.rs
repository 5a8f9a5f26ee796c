use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::accounts::{register_hirer, register_laborer, HirerSignupForm, LaborerSignupForm, SignupReceipt};
use crate::models::user::{HirerProfile, LaborerProfile, Role};
use crate::notify::{Notification, SubmissionError, SubmissionOutcome, SubmissionReply};
use crate::state::AppState;

/// POST /api/v1/signup/laborer
pub async fn handle_laborer_signup(
    State(state): State<AppState>,
    body: Result<Json<LaborerSignupForm>, JsonRejection>,
) -> SubmissionReply<SignupReceipt<LaborerProfile>> {
    let registered = match body {
        Ok(Json(form)) => register_laborer(&mut *state.store.write().await, form, Utc::now()),
        Err(rejection) => Err(SubmissionError::from(rejection)),
    };

    let outcome = match registered {
        Ok(profile) => {
            let token = state.sessions.write().await.issue(profile.id, Role::Laborer);
            SubmissionOutcome::Success(SignupReceipt {
                session_token: token,
                user_id: profile.id,
                role: Role::Laborer,
                profile,
            })
        }
        Err(reason) => SubmissionOutcome::Failure(reason),
    };

    outcome.into_reply(
        StatusCode::CREATED,
        |_| {
            Notification::success(
                "Account Created!",
                "Welcome to LaborLink. Your laborer profile has been created successfully.",
            )
        },
        "Signup failed",
    )
}

/// POST /api/v1/signup/hirer
pub async fn handle_hirer_signup(
    State(state): State<AppState>,
    body: Result<Json<HirerSignupForm>, JsonRejection>,
) -> SubmissionReply<SignupReceipt<HirerProfile>> {
    let registered = match body {
        Ok(Json(form)) => register_hirer(&mut *state.store.write().await, form, Utc::now()),
        Err(rejection) => Err(SubmissionError::from(rejection)),
    };

    let outcome = match registered {
        Ok(profile) => {
            let token = state.sessions.write().await.issue(profile.id, Role::Hirer);
            SubmissionOutcome::Success(SignupReceipt {
                session_token: token,
                user_id: profile.id,
                role: Role::Hirer,
                profile,
            })
        }
        Err(reason) => SubmissionOutcome::Failure(reason),
    };

    outcome.into_reply(
        StatusCode::CREATED,
        |_| {
            Notification::success(
                "Company Account Created!",
                "Welcome to LaborLink. Your company profile has been created successfully.",
            )
        },
        "Signup failed",
    )
}
