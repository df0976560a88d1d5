use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewPlant, NewUser, Plant, User};
use crate::database::repository::{PlantRepository, UserRepository};
use crate::filter::{FilterOrder, PlantSort};

const USER_COLUMNS: &str = "id, email, username, password_hash, role, created_at";
const PLANT_COLUMNS: &str = "id, name, last_watered_at, user_id, created_at";

/// sqlx-backed repositories over the `users` and `plants` tables
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (id, email, username, password_hash, role, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.role)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl PlantRepository for PgStore {
    async fn exists_by_owner_and_name(&self, user_id: Uuid, name: &str) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM plants WHERE user_id = $1 AND name = $2)")
                .bind(user_id)
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, plant: NewPlant) -> Result<Plant, DatabaseError> {
        let sql = format!(
            "INSERT INTO plants (id, name, last_watered_at, user_id, created_at) \
             VALUES ($1, $2, NULL, $3, $4) RETURNING {}",
            PLANT_COLUMNS
        );
        let plant = sqlx::query_as::<_, Plant>(&sql)
            .bind(Uuid::new_v4())
            .bind(&plant.name)
            .bind(plant.user_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(plant)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plant>, DatabaseError> {
        let sql = format!("SELECT {} FROM plants WHERE id = $1", PLANT_COLUMNS);
        let plant = sqlx::query_as::<_, Plant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plant)
    }

    async fn find_all_by_owner(&self, user_id: Uuid, sort: &PlantSort) -> Result<Vec<Plant>, DatabaseError> {
        // ORDER BY comes from the SortField whitelist, never from raw input
        let sql = format!(
            "SELECT {} FROM plants WHERE user_id = $1 {}",
            PLANT_COLUMNS,
            FilterOrder::generate(sort)
        );
        let plants = sqlx::query_as::<_, Plant>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(plants)
    }

    async fn set_last_watered(
        &self,
        id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<Plant>, DatabaseError> {
        let sql = format!(
            "UPDATE plants SET last_watered_at = $3 WHERE id = $1 AND user_id = $2 RETURNING {}",
            PLANT_COLUMNS
        );
        let updated = sqlx::query_as::<_, Plant>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn set_name(&self, id: Uuid, user_id: Uuid, name: &str) -> Result<Option<Plant>, DatabaseError> {
        let sql = format!(
            "UPDATE plants SET name = $3 WHERE id = $1 AND user_id = $2 RETURNING {}",
            PLANT_COLUMNS
        );
        let updated = sqlx::query_as::<_, Plant>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
