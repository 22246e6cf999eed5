pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/features", get(analysis::handle_features))
        // Session lifecycle
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        // Résumé upload and live editor
        .route(
            "/api/v1/sessions/:id/resume",
            post(sessions::handle_upload_resume).put(sessions::handle_edit_resume),
        )
        .route(
            "/api/v1/sessions/:id/target-job",
            put(sessions::handle_set_target_job),
        )
        // Analysis panels
        .route(
            "/api/v1/sessions/:id/analyses/:kind",
            get(analysis::handle_get_panel).post(analysis::handle_run_analysis),
        )
        .route(
            "/api/v1/sessions/:id/downloads/:kind",
            get(analysis::handle_download),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
