pub mod assistant;
pub mod candidates;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod job_positions;
pub mod listing;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{middleware::auth::require_session, AppState};

/// Full HTTP surface. Everything except `/health` requires a session.
pub fn router(state: AppState) -> Router {
    let recruitment_api = Router::new()
        .route("/api/recruitment/dashboard", get(dashboard::dashboard))
        .route(
            "/api/recruitment/job-positions",
            get(job_positions::list_job_positions).post(job_positions::create_job_position),
        )
        .route(
            "/api/recruitment/job-positions/bulk",
            post(job_positions::bulk_job_positions),
        )
        .route(
            "/api/recruitment/job-positions/:id",
            patch(job_positions::update_job_position).delete(job_positions::delete_job_position),
        )
        .route(
            "/api/recruitment/job-positions/:id/toggle",
            post(job_positions::toggle_job_position),
        )
        .route(
            "/api/recruitment/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route(
            "/api/recruitment/candidates/bulk",
            post(candidates::bulk_candidates),
        )
        .route(
            "/api/recruitment/candidates/:id",
            patch(candidates::update_candidate).delete(candidates::delete_candidate),
        )
        .route("/api/recruitment/assistant/tools", get(assistant::list_tools))
        .route(
            "/api/recruitment/assistant/tools/:name",
            post(assistant::invoke_tool),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(recruitment_api)
        .with_state(state)
}
