use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use saferoute_providers::error::ProviderError;
use serde_json::json;
use tracing::error;

pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
    /// The chat assistant could not answer, the client shows the message as a reply.
    Assistant(String),
    /// A chat request that could not be read, answered in the chat error shape.
    InvalidChatRequest(String),
}

fn chat_error(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(json!({
            "error": message,
            "success": false,
            "has_route": false,
        })),
    )
        .into_response()
}

impl From<ProviderError> for ApiError {
    fn from(error: ProviderError) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                error!("{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Assistant(message) => chat_error(StatusCode::INTERNAL_SERVER_ERROR, message),
            ApiError::InvalidChatRequest(message) => chat_error(StatusCode::BAD_REQUEST, message),
        }
    }
}
