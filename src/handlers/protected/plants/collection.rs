use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::filter::FilterOrder;
use crate::handlers::validation::FieldErrors;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::PlantResponse;

use super::validate_name_present;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `<field>[,<direction>]`, e.g. `sort=lastWateredAt,desc`
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlantRequest {
    #[serde(default)]
    pub name: String,
}

/// GET /api/plants - List the caller's plants
pub async fn get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<PlantResponse>> {
    let Query(query) = query?;
    let sort = FilterOrder::parse(query.sort.as_deref())?;

    let plants = state.plants.list(&auth_user.email, &sort).await?;
    Ok(ApiResponse::success(plants))
}

/// POST /api/plants - Create a plant owned by the caller
pub async fn post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<CreatePlantRequest>, JsonRejection>,
) -> ApiResult<PlantResponse> {
    let Json(request) = payload?;

    let mut errors = FieldErrors::new();
    errors.check("name", validate_name_present(&request.name));
    errors.into_result()?;

    let plant = state.plants.create(&request.name, &auth_user.email).await?;
    let location = format!("/api/plants/{}", plant.id);

    Ok(ApiResponse::created(plant, location))
}
