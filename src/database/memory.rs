use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::plant::PLANTS_OWNER_NAME_KEY;
use crate::database::models::user::{USERS_EMAIL_KEY, USERS_USERNAME_KEY};
use crate::database::models::{NewPlant, NewUser, Plant, User};
use crate::database::repository::{PlantRepository, UserRepository};
use crate::filter::{FilterOrder, PlantSort};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    plants: HashMap<Uuid, Plant>,
}

/// Process-local store with the same unique constraints as the Postgres
/// schema. Checks and writes happen under one write lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unique_violation(constraint: &str) -> DatabaseError {
    DatabaseError::UniqueViolation {
        constraint: Some(constraint.to_string()),
    }
}

fn name_taken(tables: &Tables, user_id: Uuid, name: &str, except: Option<Uuid>) -> bool {
    tables
        .plants
        .values()
        .any(|p| p.user_id == user_id && p.name == name && Some(p.id) != except)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(unique_violation(USERS_EMAIL_KEY));
        }
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(unique_violation(USERS_USERNAME_KEY));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl PlantRepository for MemoryStore {
    async fn exists_by_owner_and_name(&self, user_id: Uuid, name: &str) -> Result<bool, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(name_taken(&tables, user_id, name, None))
    }

    async fn insert(&self, plant: NewPlant) -> Result<Plant, DatabaseError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&plant.user_id) {
            return Err(DatabaseError::NotFound(format!("user {}", plant.user_id)));
        }
        if name_taken(&tables, plant.user_id, &plant.name, None) {
            return Err(unique_violation(PLANTS_OWNER_NAME_KEY));
        }

        let plant = Plant {
            id: Uuid::new_v4(),
            name: plant.name,
            last_watered_at: None,
            user_id: plant.user_id,
            created_at: Utc::now(),
        };
        tables.plants.insert(plant.id, plant.clone());
        Ok(plant)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plant>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.plants.get(&id).cloned())
    }

    async fn find_all_by_owner(&self, user_id: Uuid, sort: &PlantSort) -> Result<Vec<Plant>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut plants: Vec<Plant> = tables
            .plants
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        plants.sort_by(|a, b| FilterOrder::compare(sort, a, b));
        Ok(plants)
    }

    async fn set_last_watered(
        &self,
        id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<Plant>, DatabaseError> {
        let mut tables = self.tables.write().await;

        match tables.plants.get_mut(&id) {
            Some(stored) if stored.user_id == user_id => {
                stored.last_watered_at = Some(at);
                Ok(Some(stored.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn set_name(&self, id: Uuid, user_id: Uuid, name: &str) -> Result<Option<Plant>, DatabaseError> {
        let mut tables = self.tables.write().await;

        let owned = matches!(tables.plants.get(&id), Some(p) if p.user_id == user_id);
        if !owned {
            return Ok(None);
        }
        if name_taken(&tables, user_id, name, Some(id)) {
            return Err(unique_violation(PLANTS_OWNER_NAME_KEY));
        }

        let Some(stored) = tables.plants.get_mut(&id) else {
            return Ok(None);
        };
        stored.name = name.to_string();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;

        let owned = matches!(tables.plants.get(&id), Some(p) if p.user_id == user_id);
        if !owned {
            return Ok(false);
        }
        Ok(tables.plants.remove(&id).is_some())
    }
}
