//! Repository for the `reports` table.
//!
//! Reports are written wholesale (insert / full payload replace) and
//! patched field-level only for the append-style operations: status
//! change, photo reference append and export pointer update.

use sqlx::types::Json;
use sqlx::PgPool;

use servio_core::types::{Id, Timestamp};

use crate::models::report::{
    AuditEntry, ExportPointer, Report, ReportFilter, ReportIn, ServiceHistoryItem,
};

/// Column list for `reports` SELECT queries.
const COLUMNS: &str = "\
    id, report_no, revision_no, language, status, customer_id, issuer_id, \
    contact_id, company_profile_id, responsible_user, last_check_by, \
    arrival_date, shipping_date, warranty_status, service_authority, \
    products, blocks, actions, accessory_notes, spares, photo_sets, \
    exports, audit_log, result_notes, internal_notes, \
    created_at, updated_at, created_by, updated_by";

pub struct ReportRepo;

impl ReportRepo {
    /// Insert a fully materialized report row (create, revision, duplicate).
    pub async fn insert(pool: &PgPool, report: &Report) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO reports ({COLUMNS}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
             $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29)"
        );
        sqlx::query(&query)
            .bind(report.id)
            .bind(&report.report_no)
            .bind(report.revision_no)
            .bind(&report.language)
            .bind(&report.status)
            .bind(report.customer_id)
            .bind(report.issuer_id)
            .bind(report.contact_id)
            .bind(report.company_profile_id)
            .bind(&report.responsible_user)
            .bind(&report.last_check_by)
            .bind(report.arrival_date)
            .bind(report.shipping_date)
            .bind(&report.warranty_status)
            .bind(&report.service_authority)
            .bind(&report.products)
            .bind(&report.blocks)
            .bind(&report.actions)
            .bind(&report.accessory_notes)
            .bind(&report.spares)
            .bind(&report.photo_sets)
            .bind(&report.exports)
            .bind(&report.audit_log)
            .bind(&report.result_notes)
            .bind(&report.internal_notes)
            .bind(report.created_at)
            .bind(report.updated_at)
            .bind(&report.created_by)
            .bind(&report.updated_by)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports, newest first, honoring the filter parameters.
    pub async fn list(pool: &PgPool, filter: &ReportFilter) -> Result<Vec<Report>, sqlx::Error> {
        let (where_clause, bind_values) = build_report_filter(filter);
        let query =
            format!("SELECT {COLUMNS} FROM reports {where_clause} ORDER BY created_at DESC");

        let mut q = sqlx::query_as::<_, Report>(&query);
        for value in &bind_values {
            q = match value {
                BindValue::Uuid(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::Timestamp(v) => q.bind(*v),
            };
        }
        q.fetch_all(pool).await
    }

    /// Full replace of the editable payload. Identity fields (`report_no`,
    /// `photo_sets`, `exports`, `audit_log`, `created_*`) are untouched.
    pub async fn replace_payload(
        pool: &PgPool,
        id: Id,
        input: &ReportIn,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let actions = crate::models::report::normalize_actions(input.actions.clone());
        let result = sqlx::query(
            "UPDATE reports SET language = $2, status = $3, revision_no = $4, \
             customer_id = $5, issuer_id = $6, contact_id = $7, company_profile_id = $8, \
             responsible_user = $9, last_check_by = $10, arrival_date = $11, \
             shipping_date = $12, warranty_status = $13, service_authority = $14, \
             products = $15, blocks = $16, actions = $17, accessory_notes = $18, \
             spares = $19, result_notes = $20, internal_notes = $21, \
             updated_at = $22, updated_by = $9 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.language)
        .bind(input.status.as_str())
        .bind(input.revision_no)
        .bind(input.customer_id)
        .bind(input.issuer_id)
        .bind(input.contact_id)
        .bind(input.company_profile_id)
        .bind(&input.responsible_user)
        .bind(&input.last_check_by)
        .bind(input.arrival_date)
        .bind(input.shipping_date)
        .bind(&input.warranty_status)
        .bind(&input.service_authority)
        .bind(Json(&input.products))
        .bind(Json(&input.blocks))
        .bind(Json(&actions))
        .bind(Json(&input.accessory_notes))
        .bind(Json(&input.spares))
        .bind(&input.result_notes)
        .bind(&input.internal_notes)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply an accepted status transition: set the stage, stamp the
    /// updater and append the audit entry. The audit log is append-only.
    pub async fn apply_status(
        pool: &PgPool,
        id: Id,
        status: &str,
        user: &str,
        entry: &AuditEntry,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE reports SET status = $2, updated_at = $3, updated_by = $4, \
             audit_log = audit_log || $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .bind(user)
        .bind(Json(entry))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Append a photo reference to `photo_sets.<kind>`.
    pub async fn append_photo(
        pool: &PgPool,
        report_id: Id,
        kind: &str,
        photo_id: Id,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE reports SET \
             photo_sets = jsonb_set(photo_sets, ARRAY[$2]::text[], \
                 COALESCE(photo_sets -> $2, '[]'::jsonb) || $3), \
             updated_at = $4 \
             WHERE id = $1",
        )
        .bind(report_id)
        .bind(kind)
        .bind(Json(photo_id))
        .bind(now)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Point `exports.<kind>` at the newest artifact.
    pub async fn set_export_pointer(
        pool: &PgPool,
        report_id: Id,
        kind: &str,
        pointer: &ExportPointer,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE reports SET exports = jsonb_set(exports, ARRAY[$2]::text[], $3) \
             WHERE id = $1",
        )
        .bind(report_id)
        .bind(kind)
        .bind(Json(pointer))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Reports that reference a product in their snapshot list, newest
    /// first, mapped to compact history rows.
    pub async fn service_history(
        pool: &PgPool,
        product_id: Id,
        limit: i64,
    ) -> Result<Vec<ServiceHistoryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports WHERE EXISTS (\
                 SELECT 1 FROM jsonb_array_elements(products) AS p \
                 WHERE p ->> 'product_id' = $1) \
             ORDER BY created_at DESC LIMIT $2"
        );
        let reports = sqlx::query_as::<_, Report>(&query)
            .bind(product_id.to_string())
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(reports.into_iter().map(history_item).collect())
    }

    pub async fn count_for_product(pool: &PgPool, product_id: Id) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM reports WHERE EXISTS (\
                 SELECT 1 FROM jsonb_array_elements(products) AS p \
                 WHERE p ->> 'product_id' = $1)",
        )
        .bind(product_id.to_string())
        .fetch_one(pool)
        .await
    }

    pub async fn count_open(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM reports \
             WHERE status NOT IN ('final_report', 'archived')",
        )
        .fetch_one(pool)
        .await
    }

    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM reports WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }
}

/// Compact history row derived from a full report.
fn history_item(report: Report) -> ServiceHistoryItem {
    let summary = report
        .result_notes
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            report
                .blocks
                .0
                .actions
                .first()
                .map(|entry| entry.text.clone())
        })
        .unwrap_or_default();
    ServiceHistoryItem {
        id: report.id,
        report_no: report.report_no,
        date: report.created_at,
        status: report.status,
        summary,
    }
}

// ---------------------------------------------------------------------------
// Filter building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built report queries.
enum BindValue {
    Uuid(Id),
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from report filter parameters.
///
/// Snapshot-field filters (brand/model/serial_no/tag_no) match any product
/// snapshot on the report, case-insensitive substring.
fn build_report_filter(filter: &ReportFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(customer_id) = filter.customer_id {
        conditions.push(format!("customer_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Uuid(customer_id));
    }

    if let Some(contact_id) = filter.contact_id {
        conditions.push(format!("contact_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Uuid(contact_id));
    }

    if let Some(ref status) = filter.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    if let Some(issuer_id) = filter.issuer_id {
        conditions.push(format!("issuer_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Uuid(issuer_id));
    }

    if let Some(ref responsible_user) = filter.responsible_user {
        conditions.push(format!("responsible_user = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(responsible_user.clone()));
    }

    if let Some(date_from) = filter.date_from {
        conditions.push(format!("created_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(date_from));
    }

    if let Some(date_to) = filter.date_to {
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(date_to));
    }

    for (field, value) in [
        ("brand", &filter.brand),
        ("model", &filter.model),
        ("serial_no", &filter.serial_no),
        ("tag_no", &filter.tag_no),
    ] {
        if let Some(text) = value {
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM jsonb_array_elements(products) AS p \
                 WHERE p -> 'snapshot_fields' ->> '{field}' ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
            bind_values.push(BindValue::Text(format!("%{text}%")));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_no_where_clause() {
        let (clause, values) = build_report_filter(&ReportFilter::default());
        assert!(clause.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn column_filters_use_sequential_placeholders() {
        let filter = ReportFilter {
            status: Some("draft".into()),
            responsible_user: Some("tech1".into()),
            ..Default::default()
        };
        let (clause, values) = build_report_filter(&filter);
        assert_eq!(clause, "WHERE status = $1 AND responsible_user = $2");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn snapshot_filters_match_inside_products_jsonb() {
        let filter = ReportFilter {
            serial_no: Some("SN-42".into()),
            ..Default::default()
        };
        let (clause, values) = build_report_filter(&filter);
        assert!(clause.contains("jsonb_array_elements(products)"));
        assert!(clause.contains("'serial_no' ILIKE $1"));
        match &values[0] {
            BindValue::Text(v) => assert_eq!(v, "%SN-42%"),
            _ => panic!("expected text bind"),
        }
    }

    #[test]
    fn date_range_uses_created_at_bounds() {
        let filter = ReportFilter {
            date_from: Some(chrono::Utc::now()),
            date_to: Some(chrono::Utc::now()),
            ..Default::default()
        };
        let (clause, _) = build_report_filter(&filter);
        assert_eq!(clause, "WHERE created_at >= $1 AND created_at <= $2");
    }
}
