//! Customer and customer-contact entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use servio_core::types::{Id, Timestamp};

/// A customer company.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: Id,
    pub name: String,
    pub tax_no: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub shipping_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing a customer.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CustomerIn {
    #[validate(length(min = 1))]
    pub name: String,
    pub tax_no: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub shipping_address: Option<String>,
}

/// A contact person at a customer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: Id,
    pub customer_id: Id,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing a contact.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ContactIn {
    pub customer_id: Id,
    #[validate(length(min = 1))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}
