use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::{
        job_position_dto::{JobPositionPayload, JobPositionResponse},
        list_dto::{BulkActionPayload, BulkActionResponse, ListParams},
    },
    error::Result,
    models::context::RequestContext,
    routes::listing::list_or_export,
    services::tenant_scope::TenantScope,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/recruitment/job-positions",
    params(
        ("q" = Option<String>, Query, description = "Search across title, department, description and status"),
        ("sort" = Option<String>, Query, description = "Sort field"),
        ("dir" = Option<String>, Query, description = "asc or desc"),
        ("page" = Option<String>, Query, description = "Page number"),
        ("per_page" = Option<String>, Query, description = "10, 25, 50 or 100"),
        ("export" = Option<String>, Query, description = "csv or excel"),
        ("view" = Option<String>, Query, description = "Opaque view name, echoed back"),
        ("include_deleted" = Option<String>, Query, description = "Include soft-deleted rows")
    ),
    responses(
        (status = 200, description = "Page of job positions, or an export file"),
        (status = 401, description = "Missing or invalid session")
    )
)]
#[axum::debug_handler]
pub async fn list_job_positions(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse> {
    list_or_export(
        state.job_position_service.records(),
        &ctx,
        params,
        JobPositionResponse::from,
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/recruitment/job-positions",
    request_body = JobPositionPayload,
    responses(
        (status = 201, description = "Job position created"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job_position(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<JobPositionPayload>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    let position = state.job_position_service.create(&scope, payload).await?;
    Ok((StatusCode::CREATED, Json(JobPositionResponse::from(position))))
}

#[utoipa::path(
    patch,
    path = "/api/recruitment/job-positions/{id}",
    params(
        ("id" = Uuid, Path, description = "Job position ID")
    ),
    request_body = JobPositionPayload,
    responses(
        (status = 200, description = "Job position updated"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job position not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job_position(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobPositionPayload>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    let position = state.job_position_service.update(&scope, id, payload).await?;
    Ok(Json(JobPositionResponse::from(position)))
}

#[utoipa::path(
    delete,
    path = "/api/recruitment/job-positions/{id}",
    params(
        ("id" = Uuid, Path, description = "Job position ID")
    ),
    responses(
        (status = 204, description = "Job position deleted"),
        (status = 404, description = "Job position not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job_position(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    state
        .job_position_service
        .records()
        .soft_delete(&scope, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/recruitment/job-positions/{id}/toggle",
    params(
        ("id" = Uuid, Path, description = "Job position ID")
    ),
    responses(
        (status = 200, description = "Active flag flipped"),
        (status = 404, description = "Job position not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_job_position(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    let position = state.job_position_service.toggle_active(&scope, id).await?;
    Ok(Json(JobPositionResponse::from(position)))
}

#[utoipa::path(
    post,
    path = "/api/recruitment/job-positions/bulk",
    request_body = BulkActionPayload,
    responses(
        (status = 200, description = "Number of rows changed; unknown actions change nothing"),
        (status = 400, description = "Malformed ids")
    )
)]
#[axum::debug_handler]
pub async fn bulk_job_positions(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<BulkActionPayload>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    let ids = payload.ids.parse()?;
    let affected = state
        .job_position_service
        .records()
        .bulk_action(&scope, &ids, &payload.action)
        .await?;
    Ok(Json(BulkActionResponse {
        action: payload.action,
        affected,
    }))
}
