//! Session context: who is calling, and in which role.
//!
//! Tokens are issued at signup and sent back as `Authorization: Bearer <uuid>`.
//! A request without the header is anonymous; a request with an unknown or
//! malformed token is rejected.

pub mod handlers;

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    Anonymous,
    Authenticated { user_id: Uuid, role: Role },
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, AuthState>,
}

impl SessionStore {
    pub fn issue(&mut self, user_id: Uuid, role: Role) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions
            .insert(token, AuthState::Authenticated { user_id, role });
        token
    }

    pub fn resolve(&self, token: Uuid) -> Option<AuthState> {
        self.sessions.get(&token).copied()
    }

    pub fn revoke(&mut self, token: Uuid) -> bool {
        self.sessions.remove(&token).is_some()
    }
}

/// Per-request session, resolved from the bearer token.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub token: Option<Uuid>,
    pub auth: AuthState,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            token: None,
            auth: AuthState::Anonymous,
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self.auth {
            AuthState::Authenticated { user_id, .. } => Some(user_id),
            AuthState::Anonymous => None,
        }
    }

    pub fn require_user(&self) -> Result<(Uuid, Role), AppError> {
        match self.auth {
            AuthState::Authenticated { user_id, role } => Ok((user_id, role)),
            AuthState::Anonymous => Err(AppError::Unauthorized),
        }
    }

    pub fn require_laborer(&self) -> Result<Uuid, AppError> {
        self.require_role(Role::Laborer)
    }

    pub fn require_hirer(&self) -> Result<Uuid, AppError> {
        self.require_role(Role::Hirer)
    }

    fn require_role(&self, expected: Role) -> Result<Uuid, AppError> {
        let (user_id, role) = self.require_user()?;
        if role != expected {
            return Err(AppError::Forbidden(format!(
                "This action is only available to {expected} accounts"
            )));
        }
        Ok(user_id)
    }
}

/// Token from an `Authorization` value. The scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<Uuid> {
    let (scheme, raw) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Uuid::parse_str(raw.trim()).ok()
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Session::anonymous());
        };

        let token = header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or(AppError::Unauthorized)?;

        let auth = state
            .sessions
            .read()
            .await
            .resolve(token)
            .ok_or(AppError::Unauthorized)?;

        Ok(Session {
            token: Some(token),
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(auth: AuthState) -> Session {
        Session { token: None, auth }
    }

    #[test]
    fn test_issue_then_resolve() {
        let mut store = SessionStore::default();
        let user_id = Uuid::new_v4();
        let token = store.issue(user_id, Role::Hirer);
        assert_eq!(
            store.resolve(token),
            Some(AuthState::Authenticated {
                user_id,
                role: Role::Hirer
            })
        );
    }

    #[test]
    fn test_revoke_forgets_token() {
        let mut store = SessionStore::default();
        let token = store.issue(Uuid::new_v4(), Role::Laborer);
        assert!(store.revoke(token));
        assert!(!store.revoke(token));
        assert_eq!(store.resolve(token), None);
    }

    #[test]
    fn test_bearer_scheme_ignores_case() {
        let token = Uuid::new_v4();
        for scheme in ["Bearer", "bearer", "BEARER"] {
            assert_eq!(bearer_token(&format!("{scheme} {token}")), Some(token));
        }
        assert_eq!(bearer_token(&format!("Bearer   {token} ")), Some(token));
        assert_eq!(bearer_token(&format!("Basic {token}")), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer not-a-token"), None);
    }

    #[test]
    fn test_anonymous_is_unauthorized() {
        let anon = Session::anonymous();
        assert!(matches!(anon.require_user(), Err(AppError::Unauthorized)));
        assert_eq!(anon.user_id(), None);
    }

    #[test]
    fn test_wrong_role_is_forbidden() {
        let laborer = session(AuthState::Authenticated {
            user_id: Uuid::new_v4(),
            role: Role::Laborer,
        });
        assert!(laborer.require_laborer().is_ok());
        assert!(matches!(laborer.require_hirer(), Err(AppError::Forbidden(_))));
    }
}
