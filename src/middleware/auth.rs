use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated caller resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

/// Paths reachable without a token: registration, login and the service probes.
pub fn is_public_path(path: &str) -> bool {
    path == "/" || path == "/health" || path.starts_with("/api/auth/")
}

/// JWT authentication middleware that validates tokens and injects `AuthUser`
///
/// Every failure produces the same 401 body so callers can't tell a missing
/// token from a forged or expired one.
pub async fn jwt_auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let email = match extract_jwt_from_headers(request.headers()) {
        Ok(token) => match state.tokens.validate(token) {
            Ok(email) => email,
            Err(_) => return unauthorized(),
        },
        Err(reason) => {
            tracing::debug!("Rejecting {} {}: {}", request.method(), request.uri().path(), reason);
            return unauthorized();
        }
    };

    request.extensions_mut().insert(AuthUser { email });
    next.run(request).await
}

fn unauthorized() -> Response {
    ApiError::unauthorized("Unauthorized").into_response()
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token)
}
