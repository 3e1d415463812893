use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::services::export_service::ExportFile;

/// Wraps a rendered export as a download.
pub fn file_response(file: ExportFile) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}
