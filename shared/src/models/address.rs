//! User Address Model

use serde::{Deserialize, Serialize};

/// User address entity (收货地址)
///
/// At most one default per user; the repository clears the previous
/// default in the same transaction that sets a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserAddress {
    pub id: i64,
    pub user_id: i64,
    pub label: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create address payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAddressCreate {
    pub label: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_default: Option<bool>,
}

/// Update address payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAddressUpdate {
    pub label: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_default: Option<bool>,
}
