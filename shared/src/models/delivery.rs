//! Delivery (driver) Model

use serde::{Deserialize, Serialize};

/// Delivery driver entity (配送员)
///
/// `is_available` flips to false while a driver carries an order and is
/// released when the order reaches a terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Delivery {
    pub id: i64,
    pub branch_id: i64,
    pub driver_name: String,
    pub driver_phone: String,
    pub vehicle_plate: Option<String>,
    pub is_available: bool,
    pub is_active: bool,
    pub total_deliveries: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create driver payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryCreate {
    pub branch_id: i64,
    pub driver_name: String,
    pub driver_phone: String,
    pub vehicle_plate: Option<String>,
}

/// Update driver payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryUpdate {
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub vehicle_plate: Option<String>,
    pub is_available: Option<bool>,
    pub is_active: Option<bool>,
}
