//! Product (valve/actuator) entity models and DTOs.
//!
//! The open-ended technical card is a generic ordered string-to-string
//! mapping; the actuator sub-record and accessory list are typed JSONB.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use servio_core::types::{Id, Timestamp};

/// Installed accessory on a product (solenoid, limit switch, AFR, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Accessory {
    pub key: String,
    #[serde(default)]
    pub installed: bool,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_no: Option<String>,
    pub notes: Option<String>,
}

/// Actuator mounted on a valve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Actuator {
    #[serde(rename = "type")]
    pub actuator_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_no: Option<String>,
    pub action: Option<String>,
    #[serde(default)]
    pub model_same_as_valve: bool,
    #[serde(default)]
    pub serial_same_as_valve: bool,
}

/// A product row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: Id,
    pub customer_id: Id,
    pub brand_id: Id,
    pub model_id: Id,
    pub product_type: String,
    pub serial_no: Option<String>,
    pub tag_no: Option<String>,
    pub dn_pn: Option<String>,
    pub notes: Option<String>,
    pub technical_card: Json<BTreeMap<String, String>>,
    pub valve_type: Option<String>,
    pub manufacturer: Option<String>,
    pub size: Option<String>,
    pub pressure_class: Option<String>,
    pub connection_type: Option<String>,
    pub body_style: Option<String>,
    pub fail_action: Option<String>,
    pub body_material: Option<String>,
    pub trim_material: Option<String>,
    pub seat_material: Option<String>,
    pub stem_material: Option<String>,
    pub actuator: Option<Json<Actuator>>,
    pub accessories: Json<Vec<Accessory>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing a product.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductIn {
    pub customer_id: Id,
    pub brand_id: Id,
    pub model_id: Id,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub product_type: String,
    pub serial_no: Option<String>,
    pub tag_no: Option<String>,
    pub dn_pn: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub technical_card: BTreeMap<String, String>,
    pub valve_type: Option<String>,
    pub manufacturer: Option<String>,
    pub size: Option<String>,
    pub pressure_class: Option<String>,
    pub connection_type: Option<String>,
    pub body_style: Option<String>,
    pub fail_action: Option<String>,
    pub body_material: Option<String>,
    pub trim_material: Option<String>,
    pub seat_material: Option<String>,
    pub stem_material: Option<String>,
    pub actuator: Option<Actuator>,
    #[serde(default)]
    pub accessories: Vec<Accessory>,
}

/// Filter parameters for listing products.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub customer_id: Option<Id>,
    pub brand_id: Option<Id>,
    pub model_id: Option<Id>,
}
