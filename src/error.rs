use crate::models::ErrorResponse;
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("File must be an image")]
    NotAnImage,

    #[error("Field required: {0}")]
    MissingField(&'static str),

    #[error("Failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to send request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    Decode(reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("No response from API")]
    EmptyReply,
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::NotAnImage => StatusCode::BAD_REQUEST,
            ChatError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Turn into the caller-facing error. Server-side failures carry `context`
    /// in front of the original error text; client errors are reported as-is.
    pub fn into_api_error(self, context: &str) -> ApiError {
        let status = self.status();
        let detail = if status.is_server_error() {
            format!("{}: {}", context, self)
        } else {
            self.to_string()
        };
        ApiError { status, detail }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}
