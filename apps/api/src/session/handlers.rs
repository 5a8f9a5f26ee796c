use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::session::{AuthState, Session};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub auth: AuthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// GET /api/v1/session
pub async fn handle_get_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<SessionResponse>, AppError> {
    let identity = match session.user_id() {
        Some(user_id) => state.store.read().await.identity(user_id),
        None => None,
    };
    let (display_name, role) = identity.unzip();

    Ok(Json(SessionResponse {
        auth: session.auth,
        display_name,
        role,
    }))
}

/// DELETE /api/v1/session
pub async fn handle_sign_out(
    State(state): State<AppState>,
    session: Session,
) -> Result<StatusCode, AppError> {
    let token = session.token.ok_or(AppError::Unauthorized)?;
    state.sessions.write().await.revoke(token);
    info!("Session signed out");
    Ok(StatusCode::NO_CONTENT)
}
