use crate::error::ApiError;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::info;

/// `Json` extractor whose rejections come back as `{"detail": ...}`.
///
/// Syntax errors, missing or mistyped fields and a missing
/// `Content-Type: application/json` all answer 422, the same as a missing
/// multipart field. Failures reading the body (such as exceeding the size
/// limit) keep axum's status.
pub struct ChatJson<T>(pub T);

impl<S, T> FromRequest<S> for ChatJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err: JsonRejection| {
                let status = match &err {
                    JsonRejection::BytesRejection(_) => err.status(),
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                let detail = err.body_text();
                info!("Rejected JSON body ({}): {}", status, detail);
                ApiError { status, detail }
            })?;
        Ok(ChatJson(value))
    }
}
