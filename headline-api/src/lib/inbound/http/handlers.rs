use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;
use crate::user::errors::ValidationError;

pub mod current_user;
pub mod login;
pub mod register;

pub const NO_JSON_BODY: &str = "No JSON body detected";
const INTERNAL_SERVER_ERROR: &str = "Internal server error";
const ROUTE_NOT_FOUND: &str = "The requested URL was not found on the server";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::Success { data }))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Errors surfaced to HTTP clients.
///
/// `InternalServerError` carries the detail for the log only; clients get a
/// generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiResponseBody::new_error(StatusCode::BAD_REQUEST, message),
            ),
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ApiResponseBody::new_error(StatusCode::UNAUTHORIZED, message),
            ),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, ApiResponseBody::Failure { message })
            }
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponseBody::new_error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        INTERNAL_SERVER_ERROR.to_string(),
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest(NO_JSON_BODY.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(e) => e.into(),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::InvalidCredentials | UserError::InvalidToken | UserError::ExpiredToken => {
                ApiError::Unauthorized(err.to_string())
            }
            // Only identity resolution reports a missing user.
            UserError::NotFound(_) => {
                ApiError::Unauthorized("token subject no longer exists".to_string())
            }
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound(ROUTE_NOT_FOUND.to_string())
}

/// Response envelope shared by every endpoint, tagged by `status`.
///
/// Error responses, including 401s from the authentication middleware, nest
/// `{status, error, message}` under `details` rather than at the top level,
/// so every body carries a string `status` of `success`, `failure` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponseBody<T: Serialize + PartialEq> {
    Success { data: T },
    Failure { message: String },
    Error { details: ApiErrorData },
}

impl ApiResponseBody<()> {
    pub fn new_error(status: StatusCode, message: String) -> Self {
        ApiResponseBody::Error {
            details: ApiErrorData {
                status: status.as_u16(),
                error: status.canonical_reason().unwrap_or_default().to_string(),
                message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub status: u16,
    pub error: String,
    pub message: String,
}
