//! Repository for the `report_exports` log table.

use sqlx::types::Json;
use sqlx::PgPool;

use servio_core::types::Id;

use crate::models::export::{CreateExport, ReportExport};

const COLUMNS: &str = "id, report_id, export_type, file_name, file_path, options, created_at";

pub struct ExportRepo;

impl ExportRepo {
    pub async fn create(pool: &PgPool, input: &CreateExport) -> Result<ReportExport, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_exports (id, report_id, export_type, file_name, file_path, options) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReportExport>(&query)
            .bind(Id::now_v7())
            .bind(input.report_id)
            .bind(&input.export_type)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(Json(&input.options))
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<ReportExport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM report_exports ORDER BY created_at DESC");
        sqlx::query_as::<_, ReportExport>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<ReportExport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM report_exports WHERE id = $1");
        sqlx::query_as::<_, ReportExport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
