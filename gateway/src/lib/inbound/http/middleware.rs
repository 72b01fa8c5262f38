use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the verified identity in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Middleware that verifies the bearer token and adds the caller's identity
/// to request extensions.
///
/// Verification runs on the blocking pool since the key provider may read a
/// file. A broken signing key is the server's fault and answers 500; every
/// other rejection answers 401 without saying which check failed.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header_value = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?
        .to_string();

    let authenticator = Arc::clone(&state.authenticator);
    let verified = tokio::task::spawn_blocking(move || {
        authenticator.validate_bearer(&header_value)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Token verification task failed");
        internal_error()
    })?
    .map_err(|e| {
        if e.is_key_unavailable() {
            tracing::error!(error = %e, "Signing key unavailable");
            internal_error()
        } else {
            tracing::warn!(error = %e, "Token rejected");
            unauthorized("Invalid or expired token")
        }
    })?;

    let email = verified
        .email()
        .ok_or_else(|| {
            tracing::warn!("Verified token carries no email");
            unauthorized("Invalid token format")
        })?
        .to_string();

    req.extensions_mut().insert(AuthenticatedUser { email });

    Ok(next.run(req).await)
}

fn internal_error() -> Response {
    ApiError::InternalServerError("Internal server error".to_string()).into_response()
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
