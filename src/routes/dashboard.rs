use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;

use crate::{
    error::Result, models::context::RequestContext, services::tenant_scope::TenantScope, AppState,
};

#[utoipa::path(
    get,
    path = "/api/recruitment/dashboard",
    responses(
        (status = 200, description = "Live record counts for the caller's tenant"),
        (status = 401, description = "Missing or invalid session")
    )
)]
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    let total_job_positions = state.job_position_service.records().count(&scope).await?;
    let total_candidates = state.candidate_service.records().count(&scope).await?;
    Ok(Json(json!({
        "total_job_positions": total_job_positions,
        "total_candidates": total_candidates,
    })))
}
