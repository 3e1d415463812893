use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::{
        candidate_dto::{CandidatePayload, CandidateResponse},
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
    path = "/api/recruitment/candidates",
    params(
        ("q" = Option<String>, Query, description = "Search across name, email, phone and stage"),
        ("sort" = Option<String>, Query, description = "Sort field"),
        ("dir" = Option<String>, Query, description = "asc or desc"),
        ("page" = Option<String>, Query, description = "Page number"),
        ("per_page" = Option<String>, Query, description = "10, 25, 50 or 100"),
        ("export" = Option<String>, Query, description = "csv or excel"),
        ("view" = Option<String>, Query, description = "Opaque view name, echoed back"),
        ("include_deleted" = Option<String>, Query, description = "Include soft-deleted rows")
    ),
    responses(
        (status = 200, description = "Page of candidates, or an export file"),
        (status = 401, description = "Missing or invalid session")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse> {
    list_or_export(
        state.candidate_service.records(),
        &ctx,
        params,
        CandidateResponse::from,
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/recruitment/candidates",
    request_body = CandidatePayload,
    responses(
        (status = 201, description = "Candidate created"),
        (status = 400, description = "Invalid payload or unavailable position")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<CandidatePayload>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    let candidate = state.candidate_service.create(&scope, payload).await?;
    Ok((StatusCode::CREATED, Json(CandidateResponse::from(candidate))))
}

#[utoipa::path(
    patch,
    path = "/api/recruitment/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = CandidatePayload,
    responses(
        (status = 200, description = "Candidate updated"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CandidatePayload>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    let candidate = state.candidate_service.update(&scope, id, payload).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    delete,
    path = "/api/recruitment/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 204, description = "Candidate deleted"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    state.candidate_service.records().soft_delete(&scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/recruitment/candidates/bulk",
    request_body = BulkActionPayload,
    responses(
        (status = 200, description = "Number of rows changed; only delete is supported"),
        (status = 400, description = "Malformed ids")
    )
)]
#[axum::debug_handler]
pub async fn bulk_candidates(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<BulkActionPayload>,
) -> Result<impl IntoResponse> {
    let scope = TenantScope::for_context(&ctx)?;
    let ids = payload.ids.parse()?;
    let affected = state
        .candidate_service
        .records()
        .bulk_action(&scope, &ids, &payload.action)
        .await?;
    Ok(Json(BulkActionResponse {
        action: payload.action,
        affected,
    }))
}
