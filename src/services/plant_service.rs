use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::plant::PLANTS_OWNER_NAME_KEY;
use crate::database::models::{NewPlant, Plant, User};
use crate::database::{DatabaseError, PlantRepository, UserRepository};
use crate::filter::PlantSort;
use crate::services::ownership::ensure_owned;

#[derive(Debug, Error)]
pub enum PlantError {
    #[error("Plant '{0}' already exists")]
    AlreadyExists(String),

    #[error("Plant with id '{0}' does not exist")]
    NotFound(Uuid),

    /// A validated token named a user the store no longer knows.
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for PlantError {
    fn from(err: DatabaseError) -> Self {
        PlantError::Database(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantResponse {
    pub id: Uuid,
    pub name: String,
    pub last_watered_at: Option<DateTime<Utc>>,
}

impl From<Plant> for PlantResponse {
    fn from(plant: Plant) -> Self {
        Self {
            id: plant.id,
            name: plant.name,
            last_watered_at: plant.last_watered_at,
        }
    }
}

/// Plant CRUD scoped to the authenticated owner.
#[derive(Clone)]
pub struct PlantService {
    users: Arc<dyn UserRepository>,
    plants: Arc<dyn PlantRepository>,
}

impl PlantService {
    pub fn new(users: Arc<dyn UserRepository>, plants: Arc<dyn PlantRepository>) -> Self {
        Self { users, plants }
    }

    pub async fn create(&self, name: &str, owner_email: &str) -> Result<PlantResponse, PlantError> {
        let user = self.resolve_user(owner_email).await?;

        if self.plants.exists_by_owner_and_name(user.id, name).await? {
            return Err(PlantError::AlreadyExists(name.to_string()));
        }

        let plant = self
            .plants
            .insert(NewPlant {
                name: name.to_string(),
                user_id: user.id,
            })
            .await
            .map_err(|e| conflict_or(e, name))?;

        tracing::debug!("Created plant {} '{}' for {}", plant.id, plant.name, owner_email);
        Ok(plant.into())
    }

    pub async fn list(&self, owner_email: &str, sort: &PlantSort) -> Result<Vec<PlantResponse>, PlantError> {
        let user = self.resolve_user(owner_email).await?;
        let plants = self.plants.find_all_by_owner(user.id, sort).await?;
        Ok(plants.into_iter().map(PlantResponse::from).collect())
    }

    pub async fn get(&self, id: Uuid, owner_email: &str) -> Result<PlantResponse, PlantError> {
        let user = self.resolve_user(owner_email).await?;
        Ok(self.load_owned(id, &user).await?.into())
    }

    /// Stamp the plant as watered now. The time is always taken server-side.
    pub async fn update_last_watered(&self, id: Uuid, owner_email: &str) -> Result<PlantResponse, PlantError> {
        let user = self.resolve_user(owner_email).await?;
        let plant = self.load_owned(id, &user).await?;

        let updated = self
            .plants
            .set_last_watered(plant.id, user.id, Utc::now())
            .await?
            .ok_or(PlantError::NotFound(id))?;
        Ok(updated.into())
    }

    pub async fn rename(&self, id: Uuid, owner_email: &str, name: &str) -> Result<PlantResponse, PlantError> {
        let user = self.resolve_user(owner_email).await?;
        let plant = self.load_owned(id, &user).await?;

        if plant.name != name && self.plants.exists_by_owner_and_name(user.id, name).await? {
            return Err(PlantError::AlreadyExists(name.to_string()));
        }

        let updated = self
            .plants
            .set_name(plant.id, user.id, name)
            .await
            .map_err(|e| conflict_or(e, name))?
            .ok_or(PlantError::NotFound(id))?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: Uuid, owner_email: &str) -> Result<(), PlantError> {
        let user = self.resolve_user(owner_email).await?;
        let plant = self.load_owned(id, &user).await?;

        if !self.plants.delete(plant.id, user.id).await? {
            return Err(PlantError::NotFound(id));
        }
        tracing::debug!("Deleted plant {} for {}", id, owner_email);
        Ok(())
    }

    async fn resolve_user(&self, email: &str) -> Result<User, PlantError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| PlantError::UserNotFound(email.to_string()))
    }

    async fn load_owned(&self, id: Uuid, user: &User) -> Result<Plant, PlantError> {
        let plant = self.plants.find_by_id(id).await?;
        ensure_owned(plant, user).ok_or(PlantError::NotFound(id))
    }
}

fn conflict_or(err: DatabaseError, name: &str) -> PlantError {
    if err.violates(PLANTS_OWNER_NAME_KEY) {
        PlantError::AlreadyExists(name.to_string())
    } else {
        PlantError::Database(err)
    }
}
