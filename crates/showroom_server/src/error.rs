use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use showroom_core::{ArchiveError, RowId};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("multipart field `{0}` is required")]
    MissingField(&'static str),
    #[error("image not found: {0}")]
    ImageNotFound(RowId),
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::Multipart(_) | ServerError::MissingField(_) => StatusCode::BAD_REQUEST,
            ServerError::ImageNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Archive(_) | ServerError::Join(_) => {
                error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
