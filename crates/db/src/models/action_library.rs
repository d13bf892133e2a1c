//! Action Library entity: canned bilingual remark texts, scoped by
//! equipment type, soft-deleted via `is_active`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use servio_core::types::{Id, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionLibraryEntry {
    pub id: Id,
    pub scope: String,
    pub valve_type: Option<String>,
    pub category: String,
    pub order_index: i32,
    pub title_tr: String,
    pub title_en: String,
    pub text_tr: String,
    pub text_en: String,
    pub is_active: bool,
    pub created_by_user: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating or fully replacing a library entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ActionLibraryIn {
    #[validate(length(min = 1))]
    pub scope: String,
    #[serde(default)]
    pub valve_type: Option<String>,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub order_index: i32,
    pub title_tr: String,
    pub title_en: String,
    #[validate(length(min = 1))]
    pub text_tr: String,
    pub text_en: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_by_user: Option<String>,
}

fn default_active() -> bool {
    true
}

/// One item of a reorder request.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderItem {
    pub id: Id,
    pub order_index: i32,
}

/// Filter parameters for listing library entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionLibraryFilter {
    pub scope: Option<String>,
    pub valve_type: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}
