use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planit_core::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    /// The request body was missing, not JSON, or did not match the payload.
    #[error("{0}")]
    Body(#[from] JsonRejection),
}

/// `Json` extractor whose rejections use the structured error body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Structured error body, so clients can tell a rejected request apart from
/// a lost connection and report the offending field.
#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, field) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(v) => (StatusCode::UNPROCESSABLE_ENTITY, Some(v.field())),
                CoreError::GoalNotFound(_) => (StatusCode::NOT_FOUND, None),
                CoreError::SubmissionInProgress(_) | CoreError::CreateInProgress => {
                    (StatusCode::CONFLICT, None)
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, None),
            },
            ApiError::Body(rejection) => (rejection.status(), None),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
            field,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
