use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::warn;

/// Errors a handler can turn into a response.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Core(#[from] nd_core::Error),
}

pub type RequestResult<T> = std::result::Result<T, RequestError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match &self {
            RequestError::Core(nd_core::Error::UnknownCategory(_)) => StatusCode::BAD_REQUEST,
            RequestError::Core(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            RequestError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        let message = self.to_string();
        (status, Json(ErrorResponse { message })).into_response()
    }
}
