//! Handlers for product cards and their service history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use servio_core::error::CoreError;
use servio_core::types::Id;
use servio_db::models::product::{ProductFilter, ProductIn};
use servio_db::repositories::{ProductRepo, ReportRepo};

use crate::error::{validate_payload, AppError, AppResult};
use crate::state::AppState;

/// Upper bound on history rows returned per product.
const HISTORY_LIMIT: i64 = 50;

#[derive(Debug, Default, serde::Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, &filter).await?;
    Ok(Json(products))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<ProductIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/products/{id}/service-history
///
/// Reports that snapshot this product, newest first, with totals.
pub async fn service_history(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    let limit = params.limit.unwrap_or(HISTORY_LIMIT).clamp(1, HISTORY_LIMIT);
    let reports = ReportRepo::service_history(&state.pool, id, limit).await?;
    let total_reports = ReportRepo::count_for_product(&state.pool, id).await?;
    let last_service_date = reports.first().map(|r| r.date);

    Ok(Json(json!({
        "product_id": id,
        "total_reports": total_reports,
        "last_service_date": last_service_date,
        "reports": reports,
    })))
}
