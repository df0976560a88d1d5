// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::app::AppState;
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AuthResponse;

use super::utils::{validate_email_format, validate_password, validate_username_format};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        let mut errors = FieldErrors::new();
        errors
            .check("email", validate_email_format(&self.email))
            .check("username", validate_username_format(&self.username))
            .check("password", validate_password(&self.password));
        errors.into_result()
    }
}

/// POST /api/auth/register - Create an account and receive a JWT
///
/// Responds 201 with `{ jwt, message, userId }` and a `Location` header for
/// the new user; 409 if the email or username is taken; 400 on invalid input.
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let Json(request) = payload?;
    request.validate()?;

    tracing::info!("Registration attempt for email: {}", request.email);

    let response = state
        .auth
        .register(&request.email, &request.username, &request.password)
        .await?;

    let location = match response.user_id {
        Some(id) => format!("/api/auth/register/{}", id),
        None => "/api/auth/register".to_string(),
    };

    Ok(ApiResponse::created(response, location))
}
