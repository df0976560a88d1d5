use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::memory::MemoryStore;
use crate::database::models::{NewPlant, NewUser, Plant, User};
use crate::database::postgres::PgStore;
use crate::filter::PlantSort;

/// Persistence contract for user identities.
///
/// `insert` must enforce the email and username unique constraints and report
/// a violation as `DatabaseError::UniqueViolation` naming the constraint.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;
}

/// Persistence contract for plant records.
///
/// Mutations are keyed by id *and* owner, so a row belonging to someone
/// else is never touched even if a caller skips the ownership check.
#[async_trait]
pub trait PlantRepository: Send + Sync {
    async fn exists_by_owner_and_name(&self, user_id: Uuid, name: &str) -> Result<bool, DatabaseError>;

    async fn insert(&self, plant: NewPlant) -> Result<Plant, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plant>, DatabaseError>;

    async fn find_all_by_owner(&self, user_id: Uuid, sort: &PlantSort) -> Result<Vec<Plant>, DatabaseError>;

    /// Set only `last_watered_at`. Returns `None` if no row with this id and
    /// owner exists.
    async fn set_last_watered(
        &self,
        id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<Plant>, DatabaseError>;

    /// Set only `name`. Returns `None` if no row with this id and owner exists.
    async fn set_name(&self, id: Uuid, user_id: Uuid, name: &str) -> Result<Option<Plant>, DatabaseError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError>;
}

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

/// The credential store: both repositories over one backend.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub plants: Arc<dyn PlantRepository>,
    backend: Backend,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            users: store.clone(),
            plants: store,
            backend: Backend::Postgres(pool),
        }
    }

    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            plants: store,
            backend: Backend::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        match &self.backend {
            Backend::Postgres(pool) => DatabaseManager::health_check(pool).await,
            Backend::Memory => Ok(()),
        }
    }
}
