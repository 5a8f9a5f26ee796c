use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::listings::engine::MatchPolicy;
use crate::listings::source::{JobSource, StoreJobSource};
use crate::listings::submitter::{ApplicationSubmitter, StoreApplicationSubmitter};
use crate::session::SessionStore;
use crate::store::{MarketplaceStore, SharedStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub sessions: Arc<RwLock<SessionStore>>,
    pub config: Config,
    /// Supplies postings to the listings engine. Default: the in-memory store.
    pub job_source: Arc<dyn JobSource>,
    /// Receives job applications. Default: the in-memory store.
    pub submitter: Arc<dyn ApplicationSubmitter>,
}

impl AppState {
    pub fn new(config: Config, store: MarketplaceStore) -> Self {
        let store = store.into_shared();
        Self {
            job_source: Arc::new(StoreJobSource::new(store.clone())),
            submitter: Arc::new(StoreApplicationSubmitter::new(store.clone())),
            sessions: Arc::new(RwLock::new(SessionStore::default())),
            store,
            config,
        }
    }

    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            apply_wage_bracket: self.config.apply_wage_bracket,
        }
    }
}
