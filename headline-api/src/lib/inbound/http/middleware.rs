use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::handlers::ApiError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Extension holding the user resolved from the request's token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that resolves the caller's token to a user and adds it to
/// request extensions.
pub async fn authenticate<S: UserServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())?;

    let user = state
        .user_service
        .resolve_identity(&token)
        .await
        .map_err(|e| {
            if matches!(
                e,
                UserError::InvalidToken | UserError::ExpiredToken | UserError::NotFound(_)
            ) {
                tracing::warn!(
                    method = %req.method(),
                    uri = %req.uri(),
                    reason = %e,
                    "Token rejected"
                );
            }
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Read the token from `Authorization`.
///
/// Accepts `Bearer <token>` and `Basic base64(<token>:<ignored>)`.
fn extract_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("invalid Authorization header"))?;

    let (scheme, credentials) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| unauthorized("expected Bearer or Basic credentials"))?;
    let credentials = credentials.trim();

    let token = if scheme.eq_ignore_ascii_case("bearer") {
        credentials.to_string()
    } else if scheme.eq_ignore_ascii_case("basic") {
        let decoded = STANDARD
            .decode(credentials)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| unauthorized("invalid Basic credentials"))?;
        match decoded.split_once(':') {
            Some((token, _)) => token.to_string(),
            None => decoded,
        }
    } else {
        return Err(unauthorized("expected Bearer or Basic credentials"));
    };

    if token.is_empty() {
        return Err(unauthorized("missing token"));
    }

    Ok(token)
}

fn unauthorized(message: &str) -> ApiError {
    ApiError::Unauthorized(message.to_string())
}
