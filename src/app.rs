use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{PasswordHasher, TokenService};
use crate::config::{AppConfig, StorageBackend};
use crate::database::{DatabaseError, DatabaseManager, Store};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::{AuthService, PlantService};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
    pub tokens: TokenService,
    pub auth: AuthService,
    pub plants: PlantService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> Self {
        let tokens = TokenService::new(&config.security);
        let passwords = PasswordHasher::new(config.security.bcrypt_cost);

        Self {
            auth: AuthService::new(store.users.clone(), passwords, tokens.clone()),
            plants: PlantService::new(store.users.clone(), store.plants.clone()),
            config: Arc::new(config),
            store,
            tokens,
        }
    }

    /// Open the configured backend, bringing the Postgres schema up to date first.
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        let store = match config.database.backend {
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                DatabaseManager::migrate(&pool).await?;
                Store::postgres(pool)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                Store::memory()
            }
        };

        Ok(Self::new(config, store))
    }
}

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root::root))
        .route("/health", get(public::root::health))
        .merge(auth_public_routes())
        // Protected
        .merge(plant_routes())
        .layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware))
        .layer(TraceLayer::new_for_http());

    let router = if state.config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register_post))
        .route("/api/auth/login", post(auth::login_post))
}

fn plant_routes() -> Router<AppState> {
    use protected::plants;

    Router::new()
        // Collection
        .route("/api/plants", get(plants::collection_get).post(plants::collection_post))
        // Record
        .route("/api/plants/:id", get(plants::record_get).delete(plants::record_delete))
        .route("/api/plants/:id/last-watered", patch(plants::record_patch_last_watered))
        .route("/api/plants/:id/name", patch(plants::record_patch_name))
}
