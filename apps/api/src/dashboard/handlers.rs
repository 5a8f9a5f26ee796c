use anyhow::anyhow;
use axum::{extract::State, Json};
use chrono::Utc;

use crate::dashboard::{hirer_dashboard, laborer_dashboard, HirerDashboard, LaborerDashboard};
use crate::errors::AppError;
use crate::session::Session;
use crate::state::AppState;

/// GET /api/v1/dashboard/laborer
pub async fn handle_laborer_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<LaborerDashboard>, AppError> {
    let laborer_id = session.require_laborer()?;
    let open_jobs = state.job_source.fetch_jobs().await?;
    let store = state.store.read().await;
    let laborer = store
        .laborers
        .get(&laborer_id)
        .ok_or_else(|| anyhow!("session user {laborer_id} has no laborer profile"))?;

    Ok(Json(laborer_dashboard(
        &open_jobs,
        &store,
        laborer,
        &state.match_policy(),
        state.config.recommended_jobs_limit,
        Utc::now(),
    )))
}

/// GET /api/v1/dashboard/hirer
pub async fn handle_hirer_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<HirerDashboard>, AppError> {
    let hirer_id = session.require_hirer()?;
    let store = state.store.read().await;
    let hirer = store
        .hirers
        .get(&hirer_id)
        .ok_or_else(|| anyhow!("session user {hirer_id} has no hirer profile"))?;

    Ok(Json(hirer_dashboard(&store, hirer_id, &hirer.company_name, Utc::now())))
}
