//! File upload handler.

use axum::{
    extract::{Multipart, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::types::ApiResponse;

pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload_file))
}

/// Stored file location returned to the client
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Generated collision-resistant filename
    #[schema(example = "1714391233000-3fa4c1d2-photo.png")]
    pub filename: String,
    /// Path relative to the server working directory
    #[schema(example = "upload/1714391233000-3fa4c1d2-photo.png")]
    pub path: String,
}

/// Accept a single multipart file and write it to the upload directory
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Upload",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "No file part in the request")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadResponse>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        // Only file parts carry a filename; plain form fields are skipped
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read upload: {}", e)))?;

        let stored = state.storage.store(&original_name, &bytes).await?;

        return Ok(Json(ApiResponse::success(
            "File uploaded successfully",
            UploadResponse {
                filename: stored.filename,
                path: stored.path.to_string_lossy().into_owned(),
            },
        )));
    }

    Err(AppError::bad_request("No file uploaded"))
}
