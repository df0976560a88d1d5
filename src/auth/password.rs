//! Password hashing and verification.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Bcrypt hasher bound to a work factor from `SecurityConfig`.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password. The salt is random, so hashing the same
    /// input twice yields different strings.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A malformed hash is treated the same as a wrong password.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Rejecting password check against malformed hash: {}", e);
                false
            }
        }
    }

    /// `hash` on the blocking pool.
    pub async fn hash_blocking(&self, password: &str) -> Result<String, PasswordError> {
        let hasher = *self;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password)).await?
    }

    /// `verify` on the blocking pool. A panicked task counts as a mismatch.
    pub async fn verify_blocking(&self, password: &str, hash: &str) -> bool {
        let hasher = *self;
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .unwrap_or(false)
    }
}
