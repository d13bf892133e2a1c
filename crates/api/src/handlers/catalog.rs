//! Handlers for the brand/model catalog vocabulary.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use servio_core::error::CoreError;
use servio_core::types::Id;
use servio_db::models::catalog::{BrandIn, ProductModelIn};
use servio_db::repositories::{BrandRepo, ProductModelRepo};

use crate::error::{validate_payload, AppError, AppResult};
use crate::state::AppState;

/// GET /api/brands
pub async fn list_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let brands = BrandRepo::list(&state.pool).await?;
    Ok(Json(brands))
}

/// POST /api/brands
pub async fn create_brand(
    State(state): State<AppState>,
    Json(input): Json<BrandIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let brand = BrandRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// POST /api/brands/{id}/models
pub async fn create_model(
    State(state): State<AppState>,
    Path(brand_id): Path<Id>,
    Json(input): Json<ProductModelIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let model = ProductModelRepo::create(&state.pool, brand_id, &input).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

/// GET /api/models/{id}
pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let model = ProductModelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Model",
            id,
        }))?;
    Ok(Json(model))
}

/// PUT /api/models/{id}
pub async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<ProductModelIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let model = ProductModelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Model",
            id,
        }))?;
    Ok(Json(model))
}

/// DELETE /api/models/{id}
pub async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProductModelRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Model",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
