use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Unique constraint violation: {}", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl DatabaseError {
    /// True when this is a unique violation on the named constraint.
    pub fn violates(&self, name: &str) -> bool {
        matches!(self, DatabaseError::UniqueViolation { constraint: Some(c) } if c == name)
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DatabaseError::UniqueViolation {
                constraint: db_err.constraint().map(str::to_string),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionError(err.to_string())
            }
            other => DatabaseError::Sqlx(other),
        }
    }
}

/// Schema for the users and plants tables. Every statement is idempotent.
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL,
        username TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT users_email_key UNIQUE (email),
        CONSTRAINT users_username_key UNIQUE (username)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS plants (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        last_watered_at TIMESTAMPTZ NULL,
        user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT plants_user_id_name_key UNIQUE (user_id, name)
    )
    "#,
];

/// Connection pool setup and schema management for the Postgres backend
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(pool)
    }

    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        for statement in MIGRATIONS {
            sqlx::query(statement).execute(pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{plant::PLANTS_OWNER_NAME_KEY, user::USERS_EMAIL_KEY, user::USERS_USERNAME_KEY};

    #[test]
    fn migrations_name_the_constraints_the_services_match_on() {
        let ddl = MIGRATIONS.join("\n");
        for name in [USERS_EMAIL_KEY, USERS_USERNAME_KEY, PLANTS_OWNER_NAME_KEY] {
            assert!(ddl.contains(name), "missing constraint {}", name);
        }
    }

    #[test]
    fn violates_matches_constraint_name() {
        let err = DatabaseError::UniqueViolation {
            constraint: Some(USERS_EMAIL_KEY.to_string()),
        };
        assert!(err.violates(USERS_EMAIL_KEY));
        assert!(!err.violates(USERS_USERNAME_KEY));
        assert!(!DatabaseError::NotFound("x".into()).violates(USERS_EMAIL_KEY));
    }

    #[tokio::test]
    async fn connect_requires_url() {
        let config = crate::config::AppConfig::development().database;
        let err = DatabaseManager::connect(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::ConfigMissing("DATABASE_URL")));
    }
}
