use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::validation::validate_registration;
use crate::inbound::http::router::AppState;
use crate::user::errors::ValidationError;

pub async fn register<S: UserServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref registration| ApiSuccess::new(StatusCode::CREATED, registration.into()))
}

/// HTTP request body for registration (raw JSON).
///
/// Fields are optional so that a missing field is reported by the validator
/// rather than as an unreadable body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: Option<String>,
    password: Option<String>,
    email: Option<String>,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ValidationError> {
        validate_registration(
            self.username.as_deref(),
            self.password.as_deref(),
            self.email.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub username: String,
    pub token: String,
}

impl From<&Registration> for RegisterResponseData {
    fn from(registration: &Registration) -> Self {
        Self {
            username: registration.user.username.as_str().to_string(),
            token: registration.token.clone(),
        }
    }
}
