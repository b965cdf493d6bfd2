//! Branch Model

use serde::{Deserialize, Serialize};

/// Branch entity (门店)
///
/// A physical location with its own delivery fee, minimum order amount
/// and opening hours. Hours are stored as `"HH:MM"` strings; an
/// overnight window (`closes_at < opens_at`) wraps past midnight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub delivery_radius_km: f64,
    pub delivery_fee: f64,
    pub min_order_amount: f64,
    pub opens_at: String,
    pub closes_at: String,
    pub is_active: bool,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub delivery_radius_km: Option<f64>,
    pub delivery_fee: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub opens_at: String,
    pub closes_at: String,
}

/// Update branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub delivery_radius_km: Option<f64>,
    pub delivery_fee: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
    pub is_active: Option<bool>,
}
