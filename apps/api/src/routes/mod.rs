pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::accounts::handlers as accounts;
use crate::chat::handlers as chat;
use crate::dashboard::handlers as dashboard;
use crate::listings::handlers as listings;
use crate::postings::handlers as postings;
use crate::profiles::handlers as profiles;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts & session
        .route("/api/v1/signup/laborer", post(accounts::handle_laborer_signup))
        .route("/api/v1/signup/hirer", post(accounts::handle_hirer_signup))
        .route(
            "/api/v1/session",
            get(session::handle_get_session).delete(session::handle_sign_out),
        )
        // Listings & postings
        .route(
            "/api/v1/jobs",
            get(listings::handle_list_jobs).post(postings::handle_post_job),
        )
        .route("/api/v1/jobs/filters", get(listings::handle_filter_options))
        .route("/api/v1/jobs/:id", get(listings::handle_get_job))
        .route("/api/v1/jobs/:id/apply", post(listings::handle_apply))
        .route("/api/v1/jobs/:id/publish", post(postings::handle_publish_job))
        .route("/api/v1/jobs/:id/close", post(postings::handle_close_job))
        // Profiles
        .route(
            "/api/v1/profile",
            get(profiles::handle_get_own_profile).put(profiles::handle_update_profile),
        )
        .route("/api/v1/profiles/:id", get(profiles::handle_get_public_profile))
        .route("/api/v1/profiles/:id/reviews", post(profiles::handle_add_review))
        // Messaging
        .route(
            "/api/v1/conversations",
            get(chat::handle_list_conversations).post(chat::handle_open_conversation),
        )
        .route(
            "/api/v1/conversations/:id/messages",
            get(chat::handle_list_messages).post(chat::handle_send_message),
        )
        // Dashboards
        .route("/api/v1/dashboard/laborer", get(dashboard::handle_laborer_dashboard))
        .route("/api/v1/dashboard/hirer", get(dashboard::handle_hirer_dashboard))
        .with_state(state)
}
