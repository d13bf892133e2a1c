//! Export log entity: one row per generated artifact run.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use servio_core::types::{Id, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportExport {
    pub id: Id,
    pub report_id: Id,
    pub export_type: String,
    pub file_name: String,
    pub file_path: String,
    pub options: Json<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for recording an export run.
#[derive(Debug, Clone)]
pub struct CreateExport {
    pub report_id: Id,
    pub export_type: String,
    pub file_name: String,
    pub file_path: String,
    pub options: serde_json::Value,
}
