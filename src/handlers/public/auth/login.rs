// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::app::AppState;
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AuthResponse;

use super::utils::{validate_email_format, validate_password};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login - Authenticate and receive a JWT
///
/// Unknown email and wrong password both yield 401 "Invalid credentials".
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let Json(request) = payload?;

    let mut errors = FieldErrors::new();
    errors
        .check("email", validate_email_format(&request.email))
        .check("password", validate_password(&request.password));
    errors.into_result()?;

    tracing::info!("Login attempt for email: {}", request.email);

    let response = state.auth.login(&request.email, &request.password).await.map_err(|e| {
        tracing::info!("Login failed for: {}", request.email);
        e
    })?;

    tracing::info!("Login successful for: {}", request.email);
    Ok(ApiResponse::success(response))
}
