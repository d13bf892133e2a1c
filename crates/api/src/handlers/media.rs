//! Handlers for photo metadata and export artifacts.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use servio_core::error::CoreError;
use servio_core::types::Id;
use servio_db::models::photo::UpdatePhoto;
use servio_db::repositories::{ExportRepo, PhotoRepo};
use servio_media::store::MediaStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// PUT /api/photos/{id}
///
/// Updates caption and/or tags; variants are immutable.
pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<impl IntoResponse> {
    let photo = PhotoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Photo",
            id,
        }))?;
    Ok(Json(photo))
}

/// DELETE /api/photos/{id}
///
/// Removes the row and best-effort removes the stored variants. The id
/// may linger in a report's photo set; renderers skip dangling references.
pub async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let photo = PhotoRepo::find_by_ids(&state.pool, &[id])
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Photo",
            id,
        }))?;

    PhotoRepo::delete(&state.pool, id).await?;

    for key in [
        &photo.original_object_key,
        &photo.optimized_object_key,
        &photo.thumb_object_key,
    ] {
        let _ = tokio::fs::remove_file(state.media.upload_path(key)).await;
    }

    tracing::info!(photo_id = %id, "Photo deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/exports
///
/// Export log, newest first.
pub async fn list_exports(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let exports = ExportRepo::list(&state.pool).await?;
    let rows: Vec<_> = exports
        .into_iter()
        .map(|e| {
            json!({
                "id": e.id,
                "report_id": e.report_id,
                "type": e.export_type,
                "file_name": e.file_name,
                "url": MediaStore::export_url(&e.file_name),
                "created_at": e.created_at,
            })
        })
        .collect();
    Ok(Json(rows))
}

/// GET /api/exports/{id}/download
pub async fn download_export(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let export = ExportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Export",
            id,
        }))?;

    let path = state.media.export_path(&export.file_name);
    let bytes = tokio::fs::read(&path).await.map_err(|_| {
        AppError::Core(CoreError::NotFound {
            entity: "Export",
            id,
        })
    })?;

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("pdf") => "application/pdf",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        bytes,
    ))
}
