//! Handlers for company profiles (report issuers) and their logos.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use servio_core::error::CoreError;
use servio_core::types::Id;
use servio_db::models::company_profile::CompanyProfileIn;
use servio_db::repositories::CompanyProfileRepo;
use servio_media::mirror::spawn_put;

use crate::error::{validate_payload, AppError, AppResult};
use crate::state::AppState;

/// GET /api/settings/company-profiles
pub async fn list_profiles(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profiles = CompanyProfileRepo::list(&state.pool).await?;
    Ok(Json(profiles))
}

/// POST /api/settings/company-profiles
///
/// Marking a profile as default clears the flag on every other profile.
pub async fn create_profile(
    State(state): State<AppState>,
    Json(input): Json<CompanyProfileIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let profile = CompanyProfileRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// PUT /api/settings/company-profiles/{id}
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<CompanyProfileIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let profile = CompanyProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CompanyProfile",
            id,
        }))?;
    Ok(Json(profile))
}

/// DELETE /api/settings/company-profiles/{id}
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let deleted = CompanyProfileRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CompanyProfile",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/settings/company-profiles/{id}/logo
///
/// Stores the logo under `logos/{profile_id}/{filename}` locally, mirrors
/// it to the asset bucket and records the object key on the profile.
pub async fn upload_logo(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    CompanyProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CompanyProfile",
            id,
        }))?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("logo.png").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((file_name, data.to_vec()));
        break;
    }
    let (file_name, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;

    let object_key = format!("logos/{id}/{file_name}");
    let local_path = state.media.upload_path(&object_key);
    if let Some(parent) = local_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(servio_media::MediaError::Io)?;
    }
    tokio::fs::write(&local_path, &data)
        .await
        .map_err(servio_media::MediaError::Io)?;

    spawn_put(
        state.asset_mirror.clone(),
        object_key.clone(),
        data,
        "application/octet-stream",
    );

    CompanyProfileRepo::set_logo(&state.pool, id, &object_key).await?;

    tracing::info!(profile_id = %id, %object_key, "Company logo updated");

    Ok(Json(json!({ "logo_object_key": object_key })))
}

/// GET /api/settings/issuers
///
/// Issuer selection list for report creation; same rows as the profiles.
pub async fn list_issuers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profiles = CompanyProfileRepo::list(&state.pool).await?;
    Ok(Json(profiles))
}
