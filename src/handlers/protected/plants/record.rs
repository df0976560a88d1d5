use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::PlantResponse;

use super::validate_name_length;

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    #[serde(default)]
    pub name: String,
}

/// GET /api/plants/:id - Get a single owned plant
pub async fn get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<PlantResponse> {
    let Path(id) = id?;
    let plant = state.plants.get(id, &auth_user.email).await?;
    Ok(ApiResponse::success(plant))
}

/// PATCH /api/plants/:id/last-watered - Mark the plant as watered now
pub async fn patch_last_watered(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<PlantResponse> {
    let Path(id) = id?;
    let plant = state.plants.update_last_watered(id, &auth_user.email).await?;
    Ok(ApiResponse::success(plant))
}

/// PATCH /api/plants/:id/name - Rename an owned plant
pub async fn patch_name(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RenameRequest>, JsonRejection>,
) -> ApiResult<PlantResponse> {
    let Path(id) = id?;
    let Json(request) = payload?;

    let mut errors = FieldErrors::new();
    errors.check("name", validate_name_length(&request.name));
    errors.into_result()?;

    let plant = state.plants.rename(id, &auth_user.email, &request.name).await?;
    Ok(ApiResponse::success(plant))
}

/// DELETE /api/plants/:id - Delete an owned plant
///
/// A second delete of the same id is 404, not 204.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.plants.delete(id, &auth_user.email).await?;
    Ok(ApiResponse::no_content())
}
