//! Brand/model catalog vocabulary.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use servio_core::types::{Id, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: Id,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct BrandIn {
    #[validate(length(min = 1))]
    pub name: String,
}

/// A product model belonging to a brand.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductModel {
    pub id: Id,
    pub brand_id: Id,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductModelIn {
    pub brand_id: Id,
    #[validate(length(min = 1))]
    pub name: String,
}
