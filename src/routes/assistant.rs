use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::assistant_dto::{InvokeToolRequest, ToolListResponse},
    error::Result,
    models::context::RequestContext,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/recruitment/assistant/tools",
    responses(
        (status = 200, description = "Tools the caller may invoke")
    )
)]
#[axum::debug_handler]
pub async fn list_tools(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let tools = state.assistant_service.available_tools(&ctx);
    Ok(Json(ToolListResponse { tools }))
}

#[utoipa::path(
    post,
    path = "/api/recruitment/assistant/tools/{name}",
    params(
        ("name" = String, Path, description = "Tool name")
    ),
    request_body = InvokeToolRequest,
    responses(
        (status = 200, description = "Completed result or a confirmation proposal"),
        (status = 400, description = "Invalid arguments"),
        (status = 403, description = "Missing permission"),
        (status = 404, description = "Unknown tool")
    )
)]
#[axum::debug_handler]
pub async fn invoke_tool(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(name): Path<String>,
    Json(request): Json<InvokeToolRequest>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .assistant_service
        .invoke(&ctx, &name, request.arguments, request.confirmed)
        .await?;
    Ok(Json(outcome))
}
