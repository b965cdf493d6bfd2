//! Offer (coupon) Model

use serde::{Deserialize, Serialize};

/// Discount type (折扣类型)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum DiscountType {
    /// Percentage off, optionally capped by `max_discount_amount`
    Percentage,
    /// Fixed amount off, never more than the discount base
    FixedAmount,
}

/// Offer entity — a named discount rule with a date window, usage caps
/// and optional branch/category/item scoping.
///
/// Caps of `0` mean unlimited. At most one of the scope columns is set;
/// an unscoped offer applies to the whole order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Offer {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount_amount: f64,
    pub min_order_amount: f64,
    pub starts_at: i64,
    pub ends_at: i64,
    pub usage_limit: i64,
    pub per_user_limit: i64,
    pub times_used: i64,
    pub branch_id: Option<i64>,
    pub category_id: Option<i64>,
    pub menu_item_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCreate {
    pub code: String,
    pub name: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount_amount: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub starts_at: i64,
    pub ends_at: i64,
    pub usage_limit: Option<i64>,
    pub per_user_limit: Option<i64>,
    pub branch_id: Option<i64>,
    pub category_id: Option<i64>,
    pub menu_item_id: Option<i64>,
}

/// Update offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferUpdate {
    pub name: Option<String>,
    pub discount_value: Option<f64>,
    pub max_discount_amount: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub usage_limit: Option<i64>,
    pub per_user_limit: Option<i64>,
    pub is_active: Option<bool>,
}
