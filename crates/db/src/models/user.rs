//! Minimal user entity backing the development login stub.

use serde::Serialize;
use sqlx::FromRow;

use servio_core::types::{Id, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: Timestamp,
}
