use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const PLANTS_OWNER_NAME_KEY: &str = "plants_user_id_name_key";

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Plant {
    pub id: Uuid,
    pub name: String,
    pub last_watered_at: Option<DateTime<Utc>>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub user_id: Uuid,
}
