use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User email
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Fails when `now + ttl` falls outside the representable time range.
    pub fn new(subject: impl Into<String>, ttl: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Generation("token expiry out of range".to_string()))?;

        Ok(Self {
            sub: subject.into(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),

    /// Bad signature, malformed token and expiry all land here.
    #[error("invalid token")]
    Invalid,
}

/// Issues and validates HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
    ttl: Option<Duration>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(config: &SecurityConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            ttl: i64::try_from(config.jwt_expiry_hours)
                .ok()
                .and_then(Duration::try_hours),
        }
    }

    /// `None` when the configured lifetime does not fit a `Duration`.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let ttl = self
            .ttl
            .ok_or_else(|| TokenError::Generation("token lifetime out of range".to_string()))?;
        self.encode(&Claims::new(subject, ttl)?)
    }

    /// Verify signature and expiry, returning the subject.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            TokenError::Invalid
        })?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }
        Ok(data.claims.sub)
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }
}
