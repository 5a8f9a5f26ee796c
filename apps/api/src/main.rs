mod accounts;
mod chat;
mod config;
mod dashboard;
mod errors;
mod listings;
mod models;
mod notify;
mod postings;
mod profiles;
mod routes;
mod session;
mod state;
mod store;
mod validation;

use anyhow::Result;
use chrono::Utc;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::models::user::Role;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{seed, MarketplaceStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LaborLink API v{}", env!("CARGO_PKG_VERSION"));

    let mut store = MarketplaceStore::default();
    let demo = config
        .seed_demo_data
        .then(|| seed::seed(&mut store, Utc::now()));
    info!(
        "Marketplace loaded: {} postings, {} laborers, {} hirers",
        store.jobs.len(),
        store.laborers.len(),
        store.hirers.len()
    );

    let state = AppState::new(config.clone(), store);

    if let Some(demo) = demo {
        let mut sessions = state.sessions.write().await;
        let laborer_token = sessions.issue(demo.laborer_id, Role::Laborer);
        let hirer_token = sessions.issue(demo.hirer_id, Role::Hirer);
        info!("Demo laborer session: Bearer {laborer_token}");
        info!("Demo hirer session: Bearer {hirer_token}");
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
