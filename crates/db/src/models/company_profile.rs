//! Company profile (letterhead/issuer) entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use servio_core::types::{Id, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompanyProfile {
    pub id: Id,
    pub name: String,
    pub legal_company_name: Option<String>,
    pub legal_text: Option<String>,
    pub legal_notes: Json<Vec<String>>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub signature_labels: Json<BTreeMap<String, String>>,
    pub logo_object_key: Option<String>,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing a company profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CompanyProfileIn {
    #[validate(length(min = 1))]
    pub name: String,
    pub legal_company_name: Option<String>,
    pub legal_text: Option<String>,
    #[serde(default)]
    pub legal_notes: Vec<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub signature_labels: BTreeMap<String, String>,
    pub logo_object_key: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}
