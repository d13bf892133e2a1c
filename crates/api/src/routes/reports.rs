//! Service report lifecycle and export routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// ```text
/// GET    /reports                    -> list_reports
/// POST   /reports                    -> create_report
/// GET    /reports/{id}               -> get_report
/// PUT    /reports/{id}               -> update_report
/// DELETE /reports/{id}               -> delete_report
/// POST   /reports/{id}/status        -> change_status
/// POST   /reports/{id}/revision      -> create_revision
/// POST   /reports/{id}/duplicate     -> duplicate_report
/// POST   /reports/{id}/photos        -> upload_photo
/// POST   /reports/{id}/export/pdf    -> export_pdf
/// POST   /reports/{id}/export/excel  -> export_excel
/// GET    /issuers/{id}/reports       -> issuer_reports
/// GET    /dashboard/kpis             -> dashboard_kpis
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route(
            "/reports/{id}",
            get(reports::get_report)
                .put(reports::update_report)
                .delete(reports::delete_report),
        )
        .route("/reports/{id}/status", post(reports::change_status))
        .route("/reports/{id}/revision", post(reports::create_revision))
        .route("/reports/{id}/duplicate", post(reports::duplicate_report))
        .route("/reports/{id}/photos", post(reports::upload_photo))
        .route("/reports/{id}/export/pdf", post(reports::export_pdf))
        .route("/reports/{id}/export/excel", post(reports::export_excel))
        .route("/issuers/{id}/reports", get(reports::issuer_reports))
        .route("/dashboard/kpis", get(reports::dashboard_kpis))
}
