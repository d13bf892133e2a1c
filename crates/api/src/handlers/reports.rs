//! Handlers for the service report lifecycle: CRUD, the guarded status
//! workflow, revisions/duplicates, photo upload and document export.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use servio_core::error::CoreError;
use servio_core::report_no::{excel_filename, pdf_filename};
use servio_core::types::Id;
use servio_core::workflow::{
    check_transition, status_meta, transition_summary, FinalizationFacts, ReportStatus, StatusMeta,
};
use servio_db::models::export::CreateExport;
use servio_db::models::photo::{CreatePhoto, Photo};
use servio_db::models::report::{AuditEntry, ExportPointer, Report, ReportFilter, ReportIn};
use servio_db::repositories::{
    CompanyProfileRepo, CustomerRepo, ExportRepo, PhotoRepo, ProductRepo, ReportRepo, TemplateRepo,
};
use servio_media::mirror::spawn_put;
use servio_media::variants::build_variants;
use servio_render::excel::write_excel;
use servio_render::options::{ExcelExportOptions, PdfExportOptions};
use servio_render::pdf::write_pdf;
use servio_render::view::assemble_view;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A report as returned to clients: the row plus derived status metadata.
#[derive(Serialize)]
pub struct ReportResponse {
    #[serde(flatten)]
    pub report: Report,
    pub status_meta: StatusMeta,
}

fn report_response(report: Report) -> ReportResponse {
    let report = report.normalized();
    let status_meta = status_meta(&report.status);
    ReportResponse {
        report,
        status_meta,
    }
}

async fn load_report(state: &AppState, id: Id) -> AppResult<Report> {
    ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))
}

/// Fetch photos by id, preserving the order of the reference list.
async fn photos_in_order(state: &AppState, ids: &[Id]) -> Result<Vec<Photo>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let fetched = PhotoRepo::find_by_ids(&state.pool, ids).await?;
    let mut by_id: HashMap<Id, Photo> = fetched.into_iter().map(|p| (p.id, p)).collect();
    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/reports
pub async fn list_reports(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<impl IntoResponse> {
    let reports = ReportRepo::list(&state.pool, &filter).await?;
    let rows: Vec<ReportResponse> = reports.into_iter().map(report_response).collect();
    Ok(Json(rows))
}

/// POST /api/reports
pub async fn create_report(
    State(state): State<AppState>,
    Json(input): Json<ReportIn>,
) -> AppResult<impl IntoResponse> {
    CustomerRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: input.customer_id,
        }))?;

    let report = Report::from_input(input, Utc::now());
    ReportRepo::insert(&state.pool, &report).await?;

    tracing::info!(report_id = %report.id, report_no = %report.report_no, "Report created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": report.id,
            "report_no": report.report_no,
            "status_meta": status_meta(&report.status),
        })),
    ))
}

/// GET /api/reports/{id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let report = load_report(&state, id).await?;
    Ok(Json(report_response(report)))
}

/// PUT /api/reports/{id}
///
/// Full replace of the editable payload; last write wins. Report number,
/// photo references, export pointers and the audit log are untouched.
pub async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<ReportIn>,
) -> AppResult<impl IntoResponse> {
    let replaced = ReportRepo::replace_payload(&state.pool, id, &input, Utc::now()).await?;
    if !replaced {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }));
    }
    let report = load_report(&state, id).await?;
    Ok(Json(report_response(report)))
}

/// DELETE /api/reports/{id}
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let deleted = ReportRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

fn default_user() -> String {
    "system".into()
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
    #[serde(default = "default_user")]
    pub user: String,
}

/// POST /api/reports/{id}/status
///
/// Accepts only a move to the immediate next stage. The finalization
/// preconditions (an applied action and an "after" photo) are checked
/// before adjacency so their message wins on a doubly-invalid request.
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<ChangeStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let report = load_report(&state, id).await?;

    let target = ReportStatus::parse(&input.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", input.status)))?;

    let facts = FinalizationFacts {
        has_actions: report.has_actions(),
        has_after_photos: report.has_after_photos(),
    };
    check_transition(&report.status, target, facts)?;

    let now = Utc::now();
    let entry = AuditEntry {
        ts: now,
        user: input.user.clone(),
        action: "status_change".into(),
        diff_summary: transition_summary(&report.status, target),
    };
    ReportRepo::apply_status(&state.pool, id, target.as_str(), &input.user, &entry, now).await?;

    tracing::info!(report_id = %id, from = %report.status, to = target.as_str(), "Status changed");

    Ok(Json(json!({
        "ok": true,
        "status_meta": status_meta(target.as_str()),
    })))
}

/// POST /api/reports/{id}/revision
///
/// New row sharing the report number, revision bumped by one, workflow
/// reset to draft.
pub async fn create_revision(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let report = load_report(&state, id).await?;
    let revision = report.next_revision(Utc::now());
    ReportRepo::insert(&state.pool, &revision).await?;

    tracing::info!(report_id = %revision.id, revision_no = revision.revision_no, "Revision created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": revision.id,
            "revision_no": revision.revision_no,
        })),
    ))
}

/// POST /api/reports/{id}/duplicate
///
/// New row with a fresh report number, revision 1, draft status, no photos.
pub async fn duplicate_report(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let report = load_report(&state, id).await?;
    let duplicate = report.duplicate(Utc::now());
    ReportRepo::insert(&state.pool, &duplicate).await?;

    tracing::info!(report_id = %duplicate.id, report_no = %duplicate.report_no, "Report duplicated");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": duplicate.id,
            "report_no": duplicate.report_no,
            "revision_no": duplicate.revision_no,
        })),
    ))
}

// ---------------------------------------------------------------------------
// Photo upload
// ---------------------------------------------------------------------------

fn default_kind() -> String {
    "before".into()
}

#[derive(Debug, Deserialize)]
pub struct UploadPhotoParams {
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub caption: String,
    /// Comma-separated tag list.
    #[serde(default)]
    pub tags: Option<String>,
}

fn original_content_type(file_name: &str) -> &'static str {
    match std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// POST /api/reports/{id}/photos
///
/// Stores the original, derives the optimized and thumbnail variants in
/// one step, mirrors all three best-effort and appends the reference to
/// the report's photo set.
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Query(params): Query<UploadPhotoParams>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    if params.kind != "before" && params.kind != "after" {
        return Err(AppError::BadRequest(format!(
            "Invalid photo kind '{}': expected 'before' or 'after'",
            params.kind
        )));
    }

    let report = load_report(&state, id).await?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("photo.jpg").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((file_name, data.to_vec()));
        break;
    }
    let (file_name, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;

    let report_key = report.id.to_string();
    let stored = state
        .media
        .save_original(&report_key, &file_name, &data)
        .await?;

    // Decode/resize off the async runtime.
    let variants = {
        let store = state.media.clone();
        let report_key = report_key.clone();
        let original = stored.abs_path.clone();
        tokio::task::spawn_blocking(move || build_variants(&store, &report_key, &original))
            .await
            .map_err(|e| AppError::InternalError(format!("Variant task failed: {e}")))??
    };

    spawn_put(
        state.photo_mirror.clone(),
        stored.rel_path.clone(),
        data.clone(),
        original_content_type(&file_name),
    );
    for variant in [&variants.optimized, &variants.thumbnail] {
        if let Ok(bytes) = tokio::fs::read(state.media.upload_path(&variant.rel_path)).await {
            spawn_put(
                state.photo_mirror.clone(),
                variant.rel_path.clone(),
                bytes,
                "image/jpeg",
            );
        }
    }

    let tags: Vec<String> = params
        .tags
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let photo = PhotoRepo::create(
        &state.pool,
        &CreatePhoto {
            report_id: report.id,
            kind: params.kind.clone(),
            caption: params.caption,
            tags,
            original_object_key: stored.rel_path,
            original_size_bytes: data.len() as i64,
            optimized_object_key: variants.optimized.rel_path,
            thumb_object_key: variants.thumbnail.rel_path,
            optimized_width: variants.optimized.width as i32,
            optimized_height: variants.optimized.height as i32,
            thumb_width: variants.thumbnail.width as i32,
            thumb_height: variants.thumbnail.height as i32,
        },
    )
    .await?;

    ReportRepo::append_photo(&state.pool, report.id, &params.kind, photo.id, Utc::now()).await?;

    tracing::info!(report_id = %report.id, photo_id = %photo.id, kind = %params.kind, "Photo uploaded");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": photo.id,
            "thumb_url": servio_media::store::MediaStore::upload_url(&photo.thumb_object_key),
            "optimized_url": servio_media::store::MediaStore::upload_url(&photo.optimized_object_key),
        })),
    ))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

struct ExportInput {
    report: Report,
    before: Vec<Photo>,
    after: Vec<Photo>,
}

async fn export_input(state: &AppState, id: Id) -> AppResult<ExportInput> {
    let report = load_report(state, id).await?.normalized();
    let before = photos_in_order(state, &report.photo_sets.0.before).await?;
    let after = photos_in_order(state, &report.photo_sets.0.after).await?;
    Ok(ExportInput {
        report,
        before,
        after,
    })
}

async fn issuing_profile(
    state: &AppState,
    report: &Report,
) -> Result<Option<servio_db::models::company_profile::CompanyProfile>, sqlx::Error> {
    match report.company_profile_id {
        Some(profile_id) => CompanyProfileRepo::find_by_id(&state.pool, profile_id).await,
        None => CompanyProfileRepo::find_default(&state.pool).await,
    }
}

async fn record_export(
    state: &AppState,
    report_id: Id,
    kind: &str,
    file_name: &str,
    options: serde_json::Value,
) -> AppResult<(Id, ExportPointer)> {
    let path = state.media.export_path(file_name);
    let size_bytes = tokio::fs::metadata(&path)
        .await
        .map_err(servio_media::MediaError::Io)?
        .len() as i64;

    let export = ExportRepo::create(
        &state.pool,
        &CreateExport {
            report_id,
            export_type: kind.to_string(),
            file_name: file_name.to_string(),
            file_path: path.to_string_lossy().into_owned(),
            options,
        },
    )
    .await?;

    let pointer = ExportPointer {
        latest_url: servio_media::store::MediaStore::export_url(file_name),
        generated_at: Utc::now(),
        size_bytes,
    };
    ReportRepo::set_export_pointer(&state.pool, report_id, kind, &pointer).await?;

    Ok((export.id, pointer))
}

/// POST /api/reports/{id}/export/pdf
pub async fn export_pdf(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    options: Option<Json<PdfExportOptions>>,
) -> AppResult<impl IntoResponse> {
    let Json(options) = options.unwrap_or_default();
    options.validate().map_err(AppError::BadRequest)?;

    let input = export_input(&state, id).await?;
    let company = issuing_profile(&state, &input.report).await?;

    let view = assemble_view(
        &input.report,
        &input.before,
        &input.after,
        company.as_ref(),
        state.media.upload_dir(),
        &options,
    );

    let file_name = pdf_filename(&input.report.report_no, &options.language);
    tokio::fs::create_dir_all(state.media.export_dir())
        .await
        .map_err(servio_media::MediaError::Io)?;
    let output = state.media.export_path(&file_name);

    tokio::task::spawn_blocking(move || write_pdf(&view, &output))
        .await
        .map_err(|e| AppError::InternalError(format!("Render task failed: {e}")))??;

    let options_value =
        serde_json::to_value(&options).map_err(|e| AppError::InternalError(e.to_string()))?;
    let (export_id, pointer) = record_export(&state, id, "pdf", &file_name, options_value).await?;

    tracing::info!(report_id = %id, %file_name, size_bytes = pointer.size_bytes, "PDF exported");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "export_id": export_id,
            "url": pointer.latest_url,
            "size_bytes": pointer.size_bytes,
        })),
    ))
}

/// POST /api/reports/{id}/export/excel
pub async fn export_excel(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    options: Option<Json<ExcelExportOptions>>,
) -> AppResult<impl IntoResponse> {
    let Json(options) = options.unwrap_or_default();
    options.validate().map_err(AppError::BadRequest)?;

    let input = export_input(&state, id).await?;

    let file_name = excel_filename(
        &input.report.report_no,
        &options.export_type,
        &options.language,
    );
    tokio::fs::create_dir_all(state.media.export_dir())
        .await
        .map_err(servio_media::MediaError::Io)?;
    let output = state.media.export_path(&file_name);

    let kind = format!("excel_{}", options.export_type);
    let options_value =
        serde_json::to_value(&options).map_err(|e| AppError::InternalError(e.to_string()))?;

    {
        let upload_dir = state.media.upload_dir().to_path_buf();
        let ExportInput {
            report,
            before,
            after,
        } = input;
        tokio::task::spawn_blocking(move || {
            write_excel(&report, &before, &after, &upload_dir, &options, &output)
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Render task failed: {e}")))??;
    }

    let (export_id, pointer) = record_export(&state, id, &kind, &file_name, options_value).await?;

    tracing::info!(report_id = %id, %file_name, size_bytes = pointer.size_bytes, "Spreadsheet exported");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "export_id": export_id,
            "url": pointer.latest_url,
            "size_bytes": pointer.size_bytes,
        })),
    ))
}

// ---------------------------------------------------------------------------
// Issuer views and dashboard
// ---------------------------------------------------------------------------

/// GET /api/issuers/{id}/reports
pub async fn issuer_reports(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let filter = ReportFilter {
        issuer_id: Some(id),
        ..Default::default()
    };
    let reports = ReportRepo::list(&state.pool, &filter).await?;
    let rows: Vec<ReportResponse> = reports.into_iter().map(report_response).collect();
    Ok(Json(rows))
}

/// GET /api/dashboard/kpis
pub async fn dashboard_kpis(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let open_reports = ReportRepo::count_open(&state.pool).await?;
    let final_reports = ReportRepo::count_by_status(&state.pool, "final_report").await?;
    let awaiting_approval = ReportRepo::count_by_status(&state.pool, "awaiting_approval").await?;
    let customers = CustomerRepo::count(&state.pool).await?;
    let products = ProductRepo::count(&state.pool).await?;
    let templates = TemplateRepo::count(&state.pool).await?;

    Ok(Json(json!({
        "open_reports": open_reports,
        "final_reports": final_reports,
        "awaiting_approval": awaiting_approval,
        "customers": customers,
        "products": products,
        "templates": templates,
    })))
}
