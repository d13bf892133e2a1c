//! Handlers for the Action Library of canned bilingual remarks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use servio_core::error::CoreError;
use servio_core::types::Id;
use servio_db::models::action_library::{ActionLibraryFilter, ActionLibraryIn, ReorderItem};
use servio_db::repositories::ActionLibraryRepo;

use crate::error::{validate_payload, AppError, AppResult};
use crate::state::AppState;

/// GET /api/action-library
pub async fn list_entries(
    State(state): State<AppState>,
    Query(filter): Query<ActionLibraryFilter>,
) -> AppResult<impl IntoResponse> {
    let entries = ActionLibraryRepo::list(&state.pool, &filter).await?;
    Ok(Json(entries))
}

/// POST /api/action-library
pub async fn create_entry(
    State(state): State<AppState>,
    Json(input): Json<ActionLibraryIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let entry = ActionLibraryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/action-library/{id}
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<ActionLibraryIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let entry = ActionLibraryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ActionLibraryEntry",
            id,
        }))?;
    Ok(Json(entry))
}

/// DELETE /api/action-library/{id}
///
/// Soft delete; the entry stays in the table with `is_active = false`.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let deleted = ActionLibraryRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ActionLibraryEntry",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/action-library/reorder
pub async fn reorder_entries(
    State(state): State<AppState>,
    Json(items): Json<Vec<ReorderItem>>,
) -> AppResult<impl IntoResponse> {
    ActionLibraryRepo::reorder(&state.pool, &items).await?;
    Ok(Json(json!({ "ok": true, "updated": items.len() })))
}
