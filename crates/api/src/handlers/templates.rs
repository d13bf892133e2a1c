//! Handlers for boilerplate text templates.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use servio_core::error::CoreError;
use servio_core::types::Id;
use servio_db::models::template::TemplateIn;
use servio_db::repositories::TemplateRepo;

use crate::error::{validate_payload, AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TemplateListParams {
    #[serde(rename = "type")]
    pub template_type: Option<String>,
}

/// GET /api/templates
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<TemplateListParams>,
) -> AppResult<impl IntoResponse> {
    let templates = TemplateRepo::list(&state.pool, params.template_type.as_deref()).await?;
    Ok(Json(templates))
}

/// POST /api/templates
pub async fn create_template(
    State(state): State<AppState>,
    Json(input): Json<TemplateIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let template = TemplateRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/templates/{id}
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<TemplateIn>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&input)?;
    let template = TemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }))?;
    Ok(Json(template))
}

/// DELETE /api/templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let deleted = TemplateRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
