//! Photo entity model and DTOs.
//!
//! A photo row references three stored variants produced atomically at
//! upload time (original, optimized, thumbnail).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use servio_core::types::{Id, Timestamp};

/// A stored photo with its derived variants.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: Id,
    pub report_id: Id,
    pub kind: String,
    pub caption: String,
    pub tags: Vec<String>,
    pub original_object_key: String,
    pub original_size_bytes: i64,
    pub optimized_object_key: String,
    pub thumb_object_key: String,
    pub optimized_width: i32,
    pub optimized_height: i32,
    pub thumb_width: i32,
    pub thumb_height: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a freshly processed photo.
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub report_id: Id,
    pub kind: String,
    pub caption: String,
    pub tags: Vec<String>,
    pub original_object_key: String,
    pub original_size_bytes: i64,
    pub optimized_object_key: String,
    pub thumb_object_key: String,
    pub optimized_width: i32,
    pub optimized_height: i32,
    pub thumb_width: i32,
    pub thumb_height: i32,
}

/// DTO for updating a photo's caption/tags.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePhoto {
    pub caption: Option<String>,
    pub tags: Option<Vec<String>>,
}
