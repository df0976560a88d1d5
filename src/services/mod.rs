pub mod auth_service;
pub mod ownership;
pub mod plant_service;

pub use auth_service::{AuthError, AuthResponse, AuthService};
pub use ownership::{ensure_owned, Ownership};
pub use plant_service::{PlantError, PlantResponse, PlantService};
