use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::dto::list_dto::{ListParams, ListResponse};
use crate::error::Result;
use crate::models::context::RequestContext;
use crate::models::record::Record;
use crate::routes::export::file_response;
use crate::services::export_service::{ExportFormat, ExportService};
use crate::services::list_query::ListQuery;
use crate::services::list_service::ListService;
use crate::services::tenant_scope::TenantScope;

/// Shared body of the list endpoints: a JSON page, or the whole filtered
/// result as a file when `export` names a known format.
pub async fn list_or_export<E, R>(
    service: &ListService<E>,
    ctx: &RequestContext,
    params: ListParams,
    present: impl Fn(E) -> R,
) -> Result<Response>
where
    E: Record,
    R: Serialize,
{
    let scope = TenantScope::for_context(ctx)?;
    let query = ListQuery::from_params(E::schema(), &params);

    if let Some(format) = params.export.as_deref().and_then(ExportFormat::parse) {
        let records = service.list_all(&scope, &query).await?;
        let file = ExportService::export_default(&records, format)?;
        tracing::info!(
            kind = E::schema().kind,
            rows = records.len(),
            file = %file.filename,
            "export served"
        );
        return Ok(file_response(file));
    }

    let page = service.list(&scope, &query).await?;
    let body = ListResponse {
        page: page.map(present),
        search_query: query.search_query,
        sort_field: query.sort_field,
        sort_dir: query.order.dir,
        current_view: params.view.unwrap_or_default(),
    };
    Ok(Json(body).into_response())
}
