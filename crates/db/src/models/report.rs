//! Service report entity model and DTOs.
//!
//! A report embeds product snapshots, free-text blocks, applied actions,
//! spares, photo references and an append-only audit log as JSONB. The row
//! is the single source of truth and is replaced wholesale on edit
//! (last-write-wins; no version token by design).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use servio_core::compose::compose_final_text;
use servio_core::report_no::generate_report_no;
use servio_core::types::{Id, Timestamp};
use servio_core::workflow::ReportStatus;

// ---------------------------------------------------------------------------
// Embedded document types
// ---------------------------------------------------------------------------

/// Immutable snapshot of a product's fields taken at report creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub product_id: String,
    #[serde(default)]
    pub snapshot_fields: BTreeMap<String, String>,
}

/// One entry of a free-text block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextEntry {
    pub text: String,
}

/// Named free-text sections of a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportBlocks {
    #[serde(default)]
    pub complaint: Vec<TextEntry>,
    #[serde(default)]
    pub problems: Vec<TextEntry>,
    #[serde(default)]
    pub actions: Vec<TextEntry>,
}

/// An applied action: a library snapshot plus a manual extension.
///
/// `final_text_*` is derived on every read; whatever a client sends for it
/// is overwritten by [`AppliedAction::normalized`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppliedAction {
    #[serde(default)]
    pub library_id: Option<String>,
    pub snapshot_text_tr: String,
    pub snapshot_text_en: String,
    #[serde(default)]
    pub manual_extension_tr: String,
    #[serde(default)]
    pub manual_extension_en: String,
    #[serde(default)]
    pub final_text_tr: String,
    #[serde(default)]
    pub final_text_en: String,
    #[serde(default)]
    pub order_index: i32,
}

impl AppliedAction {
    /// Recompute the derived final text pair.
    pub fn normalized(mut self) -> Self {
        self.final_text_tr = compose_final_text(&self.snapshot_text_tr, &self.manual_extension_tr);
        self.final_text_en = compose_final_text(&self.snapshot_text_en, &self.manual_extension_en);
        self
    }
}

/// Normalize a list of applied actions in place.
pub fn normalize_actions(actions: Vec<AppliedAction>) -> Vec<AppliedAction> {
    actions.into_iter().map(AppliedAction::normalized).collect()
}

/// Spare part line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpareLine {
    pub part_name: String,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub note: String,
}

/// Photo references keyed by capture kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoSets {
    #[serde(default)]
    pub before: Vec<Id>,
    #[serde(default)]
    pub after: Vec<Id>,
}

/// Pointer to the newest export artifact of one kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPointer {
    pub latest_url: String,
    pub generated_at: Timestamp,
    pub size_bytes: i64,
}

/// One append-only audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub ts: Timestamp,
    pub user: String,
    pub action: String,
    pub diff_summary: String,
}

// ---------------------------------------------------------------------------
// Report row
// ---------------------------------------------------------------------------

/// A service report row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: Id,
    pub report_no: String,
    pub revision_no: i32,
    pub language: String,
    pub status: String,
    pub customer_id: Id,
    pub issuer_id: Option<Id>,
    pub contact_id: Option<Id>,
    pub company_profile_id: Option<Id>,
    pub responsible_user: String,
    pub last_check_by: Option<String>,
    pub arrival_date: Option<Timestamp>,
    pub shipping_date: Option<Timestamp>,
    pub warranty_status: Option<String>,
    pub service_authority: Option<String>,
    pub products: Json<Vec<ProductSnapshot>>,
    pub blocks: Json<ReportBlocks>,
    pub actions: Json<Vec<AppliedAction>>,
    pub accessory_notes: Json<Vec<serde_json::Value>>,
    pub spares: Json<Vec<SpareLine>>,
    pub photo_sets: Json<PhotoSets>,
    pub exports: Json<BTreeMap<String, ExportPointer>>,
    pub audit_log: Json<Vec<AuditEntry>>,
    pub result_notes: Option<String>,
    pub internal_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: String,
    pub updated_by: String,
}

impl Report {
    /// Build a fresh report row from a creation payload.
    ///
    /// Assigns the report number from `ts` (never changed afterwards),
    /// starts with empty photo sets and exports, and seeds the audit log.
    pub fn from_input(input: ReportIn, ts: Timestamp) -> Self {
        let audit = AuditEntry {
            ts,
            user: input.responsible_user.clone(),
            action: "create".into(),
            diff_summary: "initial draft".into(),
        };
        Report {
            id: Id::now_v7(),
            report_no: generate_report_no(ts),
            revision_no: input.revision_no,
            language: input.language.clone(),
            status: input.status.as_str().to_string(),
            customer_id: input.customer_id,
            issuer_id: input.issuer_id,
            contact_id: input.contact_id,
            company_profile_id: input.company_profile_id,
            responsible_user: input.responsible_user.clone(),
            last_check_by: input.last_check_by,
            arrival_date: input.arrival_date,
            shipping_date: input.shipping_date,
            warranty_status: input.warranty_status,
            service_authority: input.service_authority,
            products: Json(input.products),
            blocks: Json(input.blocks),
            actions: Json(normalize_actions(input.actions)),
            accessory_notes: Json(input.accessory_notes),
            spares: Json(input.spares),
            photo_sets: Json(PhotoSets::default()),
            exports: Json(BTreeMap::new()),
            audit_log: Json(vec![audit]),
            result_notes: input.result_notes,
            internal_notes: input.internal_notes,
            created_at: ts,
            updated_at: ts,
            created_by: input.responsible_user.clone(),
            updated_by: input.responsible_user,
        }
    }

    /// Derive a new revision of this report.
    ///
    /// Keeps the report number and all content, bumps `revision_no` by
    /// exactly one and resets the workflow to `draft`.
    pub fn next_revision(&self, ts: Timestamp) -> Report {
        let mut rev = self.clone();
        rev.id = Id::now_v7();
        rev.revision_no = self.revision_no + 1;
        rev.status = ReportStatus::Draft.as_str().to_string();
        rev.created_at = ts;
        rev.updated_at = ts;
        rev
    }

    /// Derive a duplicate of this report.
    ///
    /// Assigns a fresh report number, resets the revision counter and the
    /// workflow, and clears the photo references. Regardless of the source
    /// report's state, a duplicate always starts as an empty-photo draft.
    pub fn duplicate(&self, ts: Timestamp) -> Report {
        let mut dup = self.clone();
        dup.id = Id::now_v7();
        dup.report_no = generate_report_no(ts);
        dup.revision_no = 1;
        dup.status = ReportStatus::Draft.as_str().to_string();
        dup.photo_sets = Json(PhotoSets::default());
        dup.created_at = ts;
        dup.updated_at = ts;
        dup
    }

    /// Whether the report has at least one applied action, counting both
    /// the structured list and the actions text block.
    pub fn has_actions(&self) -> bool {
        !self.actions.0.is_empty() || !self.blocks.0.actions.is_empty()
    }

    /// Whether the report has at least one "after" photo reference.
    pub fn has_after_photos(&self) -> bool {
        !self.photo_sets.0.after.is_empty()
    }

    /// Recompute all derived action text (applied on every read/list).
    pub fn normalized(mut self) -> Self {
        self.actions = Json(normalize_actions(self.actions.0));
        self
    }
}

// ---------------------------------------------------------------------------
// Create/replace DTO
// ---------------------------------------------------------------------------

fn default_language() -> String {
    "tr".into()
}

fn default_status() -> ReportStatus {
    ReportStatus::Draft
}

fn default_revision_no() -> i32 {
    1
}

/// DTO for creating a report or fully replacing its editable fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportIn {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_status")]
    pub status: ReportStatus,
    #[serde(default = "default_revision_no")]
    pub revision_no: i32,
    pub customer_id: Id,
    #[serde(default)]
    pub issuer_id: Option<Id>,
    #[serde(default)]
    pub contact_id: Option<Id>,
    #[serde(default)]
    pub company_profile_id: Option<Id>,
    pub responsible_user: String,
    #[serde(default)]
    pub last_check_by: Option<String>,
    #[serde(default)]
    pub arrival_date: Option<Timestamp>,
    #[serde(default)]
    pub shipping_date: Option<Timestamp>,
    #[serde(default)]
    pub warranty_status: Option<String>,
    #[serde(default)]
    pub service_authority: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductSnapshot>,
    #[serde(default)]
    pub blocks: ReportBlocks,
    #[serde(default)]
    pub actions: Vec<AppliedAction>,
    #[serde(default)]
    pub accessory_notes: Vec<serde_json::Value>,
    #[serde(default)]
    pub spares: Vec<SpareLine>,
    #[serde(default)]
    pub result_notes: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
}

/// Filter parameters for listing reports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilter {
    pub customer_id: Option<Id>,
    pub contact_id: Option<Id>,
    pub status: Option<String>,
    pub issuer_id: Option<Id>,
    pub responsible_user: Option<String>,
    pub date_from: Option<Timestamp>,
    pub date_to: Option<Timestamp>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_no: Option<String>,
    pub tag_no: Option<String>,
}

/// One row of a product's service history.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHistoryItem {
    pub id: Id,
    pub report_no: String,
    pub date: Timestamp,
    pub status: String,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_input() -> ReportIn {
        ReportIn {
            language: "tr".into(),
            status: ReportStatus::Draft,
            revision_no: 1,
            customer_id: Id::now_v7(),
            issuer_id: None,
            contact_id: None,
            company_profile_id: None,
            responsible_user: "tech1".into(),
            last_check_by: None,
            arrival_date: None,
            shipping_date: None,
            warranty_status: None,
            service_authority: None,
            products: vec![],
            blocks: ReportBlocks::default(),
            actions: vec![AppliedAction {
                snapshot_text_tr: "Salmastra seti yenilendi.".into(),
                snapshot_text_en: "The packing set was replaced.".into(),
                manual_extension_en: "Graphite packing used.".into(),
                ..Default::default()
            }],
            accessory_notes: vec![],
            spares: vec![],
            result_notes: None,
            internal_notes: None,
        }
    }

    fn ts() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn from_input_seeds_audit_and_empty_photo_sets() {
        let report = Report::from_input(sample_input(), ts());
        assert!(report.report_no.starts_with("SR-240502-"));
        assert!(report.photo_sets.0.before.is_empty());
        assert!(report.photo_sets.0.after.is_empty());
        assert!(report.exports.0.is_empty());
        assert_eq!(report.audit_log.0.len(), 1);
        assert_eq!(report.audit_log.0[0].action, "create");
    }

    #[test]
    fn from_input_normalizes_action_text() {
        let report = Report::from_input(sample_input(), ts());
        let action = &report.actions.0[0];
        assert_eq!(action.final_text_tr, "Salmastra seti yenilendi.");
        assert_eq!(
            action.final_text_en,
            "The packing set was replaced. Graphite packing used."
        );
    }

    #[test]
    fn revision_bumps_by_one_and_resets_status() {
        let mut report = Report::from_input(sample_input(), ts());
        report.status = "in_service".into();
        report.revision_no = 3;

        let rev = report.next_revision(ts());
        assert_eq!(rev.revision_no, 4);
        assert_eq!(rev.status, "draft");
        // Content and identity-adjacent fields are retained.
        assert_eq!(rev.report_no, report.report_no);
        assert_eq!(rev.actions.0.len(), report.actions.0.len());
        assert_ne!(rev.id, report.id);
    }

    #[test]
    fn duplicate_resets_photos_revision_and_number() {
        let mut report = Report::from_input(sample_input(), ts());
        report.status = "final_report".into();
        report.revision_no = 5;
        report.photo_sets = Json(PhotoSets {
            before: vec![Id::now_v7()],
            after: vec![Id::now_v7()],
        });

        let later = chrono::Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
        let dup = report.duplicate(later);
        assert_eq!(dup.revision_no, 1);
        assert_eq!(dup.status, "draft");
        assert!(dup.photo_sets.0.before.is_empty());
        assert!(dup.photo_sets.0.after.is_empty());
        assert!(dup.report_no.starts_with("SR-250115-"));
        assert_ne!(dup.report_no, report.report_no);
    }

    #[test]
    fn has_actions_counts_text_block_too() {
        let mut input = sample_input();
        input.actions.clear();
        let mut report = Report::from_input(input, ts());
        assert!(!report.has_actions());

        report.blocks = Json(ReportBlocks {
            actions: vec![TextEntry {
                text: "Valve overhauled.".into(),
            }],
            ..Default::default()
        });
        assert!(report.has_actions());
    }

    #[test]
    fn normalized_overwrites_client_supplied_final_text() {
        let mut input = sample_input();
        input.actions[0].final_text_tr = "client lies".into();
        let report = Report::from_input(input, ts()).normalized();
        assert_eq!(report.actions.0[0].final_text_tr, "Salmastra seti yenilendi.");
    }
}
