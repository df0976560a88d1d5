use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{PasswordError, PasswordHasher, TokenError, TokenService};
use crate::database::models::user::USERS_USERNAME_KEY;
use crate::database::models::NewUser;
use crate::database::{DatabaseError, UserRepository};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already exists: {0}")]
    EmailExists(String),

    #[error("Username already exists: {0}")]
    UsernameExists(String),

    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub jwt: String,
    pub message: String,
    pub user_id: Option<Uuid>,
}

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<AuthResponse, AuthError> {
        if self.users.exists_by_email(email).await? {
            return Err(AuthError::EmailExists(email.to_string()));
        }

        let password_hash = self.passwords.hash_blocking(password).await?;

        // The pre-check above can race another registration; the unique
        // constraint decides, and its violation means the same thing.
        let user = self
            .users
            .insert(NewUser::new(email, username, password_hash))
            .await
            .map_err(|e| match e {
                e if e.violates(USERS_USERNAME_KEY) => AuthError::UsernameExists(username.to_string()),
                DatabaseError::UniqueViolation { .. } => AuthError::EmailExists(email.to_string()),
                other => AuthError::Database(other),
            })?;

        let jwt = self.tokens.issue(&user.email)?;
        tracing::info!("User registered: {} ({})", user.email, user.id);

        Ok(AuthResponse {
            jwt,
            message: "User registered successfully".to_string(),
            user_id: Some(user.id),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify_blocking(password, &user.password_hash).await {
            return Err(AuthError::InvalidCredentials);
        }

        let jwt = self.tokens.issue(&user.email)?;

        Ok(AuthResponse {
            jwt,
            message: "Login successful".to_string(),
            user_id: None,
        })
    }
}
