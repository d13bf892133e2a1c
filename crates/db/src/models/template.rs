//! Boilerplate text template entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use servio_core::types::{Id, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: Id,
    #[sqlx(rename = "template_type")]
    #[serde(rename = "type")]
    pub template_type: String,
    pub title: String,
    pub language: String,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing a template.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TemplateIn {
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub template_type: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub text: String,
}

fn default_language() -> String {
    "tr".into()
}
