//! Typed submission results and the user-facing notification derived from them.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Success,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Why a form submission was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
}

impl SubmissionError {
    fn status(&self) -> StatusCode {
        match self {
            SubmissionError::Invalid(_) => StatusCode::BAD_REQUEST,
            SubmissionError::Conflict(_) => StatusCode::CONFLICT,
            SubmissionError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// A body that does not decode into the form is reported like any other
/// invalid submission.
impl From<JsonRejection> for SubmissionError {
    fn from(rejection: JsonRejection) -> Self {
        SubmissionError::Invalid(rejection.body_text())
    }
}

#[derive(Debug)]
pub enum SubmissionOutcome<T> {
    Success(T),
    Failure(SubmissionError),
}

impl<T> From<Result<T, SubmissionError>> for SubmissionOutcome<T> {
    fn from(result: Result<T, SubmissionError>) -> Self {
        match result {
            Ok(value) => SubmissionOutcome::Success(value),
            Err(e) => SubmissionOutcome::Failure(e),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse<T> {
    pub ok: bool,
    pub notification: Notification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub type SubmissionReply<T> = (StatusCode, Json<SubmissionResponse<T>>);

impl<T: Serialize> SubmissionOutcome<T> {
    /// Branches the notification on the outcome. Failures carry the reason as
    /// the description under `failure_title`.
    pub fn into_reply(
        self,
        success_status: StatusCode,
        on_success: impl FnOnce(&T) -> Notification,
        failure_title: &str,
    ) -> SubmissionReply<T> {
        match self {
            SubmissionOutcome::Success(data) => {
                let notification = on_success(&data);
                (
                    success_status,
                    Json(SubmissionResponse {
                        ok: true,
                        notification,
                        data: Some(data),
                    }),
                )
            }
            SubmissionOutcome::Failure(reason) => {
                tracing::warn!("{failure_title}: {reason}");
                (
                    reason.status(),
                    Json(SubmissionResponse {
                        ok: false,
                        notification: Notification::failure(failure_title, reason.to_string()),
                        data: None,
                    }),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_branch_uses_callback() {
        let outcome: SubmissionOutcome<u32> = Ok(7).into();
        let (status, Json(body)) = outcome.into_reply(
            StatusCode::CREATED,
            |n| Notification::success("Saved", format!("item {n}")),
            "Could not save",
        );
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.ok);
        assert_eq!(body.notification.description, "item 7");
        assert_eq!(body.data, Some(7));
    }

    #[test]
    fn test_failure_branch_is_destructive() {
        let outcome: SubmissionOutcome<u32> =
            Err(SubmissionError::Conflict("already applied".to_string())).into();
        let (status, Json(body)) = outcome.into_reply(
            StatusCode::OK,
            |_| Notification::success("Saved", ""),
            "Application failed",
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(!body.ok);
        assert_eq!(body.notification.variant, NotificationVariant::Destructive);
        assert_eq!(body.notification.title, "Application failed");
        assert_eq!(body.notification.description, "already applied");
        assert!(body.data.is_none());
    }
}
