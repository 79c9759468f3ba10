//! Image archive routes
//!
//! Storage calls are blocking (SQLite plus file IO) and run on the blocking
//! pool.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use showroom_core::RowId;
use tracing::info;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";
const IMAGE_CONTENT_TYPE: &str = "image/jpeg";
const UNNAMED_UPLOAD: &str = "image";

/// POST /file-system/image - store the `image` field, reply with its id as text
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<String> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or(UNNAMED_UPLOAD).to_string();
        let bytes = field.bytes().await?;
        let size = bytes.len();

        let locator = state.locator.clone();
        let id = tokio::task::spawn_blocking(move || locator.save(&bytes, &name)).await??;

        info!(image_id = id, bytes = size, "image uploaded");
        return Ok(id.to_string());
    }

    Err(ServerError::MissingField(IMAGE_FIELD))
}

/// GET /file-system/image/{id} - stored bytes as image/jpeg
pub async fn download_image(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
) -> ServerResult<Response> {
    let locator = state.locator.clone();
    let bytes = tokio::task::spawn_blocking(move || locator.find(id))
        .await??
        .ok_or(ServerError::ImageNotFound(id))?;

    Ok(([(header::CONTENT_TYPE, IMAGE_CONTENT_TYPE)], bytes).into_response())
}
