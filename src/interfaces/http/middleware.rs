//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

use crate::application::{Actor, UserService};
use crate::domain::DomainError;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    UnknownAccount,
    Unavailable,
}

/// State handed to [`auth_middleware`]
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub user_service: Arc<UserService>,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer-token authentication.
///
/// On success the current [`Actor`] is stored in the request extensions,
/// handlers pick it up with `Extension<Actor>`.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) if claims.is_expired() => {
            return auth_error_response(AuthError::ExpiredToken);
        }
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            return auth_error_response(AuthError::InvalidToken);
        }
    };

    let actor: Actor = match auth_state.user_service.resolve_actor(&claims).await {
        Ok(actor) => actor,
        Err(DomainError::Database(msg)) => {
            tracing::error!(error = %msg, "Failed to load account for token");
            return auth_error_response(AuthError::Unavailable);
        }
        Err(_) => return auth_error_response(AuthError::UnknownAccount),
    };

    request.extensions_mut().insert(actor);
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::UnknownAccount => (StatusCode::UNAUTHORIZED, "Account no longer exists"),
        AuthError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Authentication temporarily unavailable",
        ),
    };

    let body = Json(json!({
        "success": false,
        "data": null,
        "error": message
    }));

    (status, body).into_response()
}
