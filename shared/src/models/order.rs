//! Order Models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status (订单状态)
///
/// Forward chain: pending → confirmed → preparing → ready →
/// out_for_delivery → delivered. `cancelled` is reachable only from
/// `pending`/`confirmed`. The transition table lives in the server's
/// order status module.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Order entity (订单)
///
/// Monetary fields are point-in-time snapshots: menu price changes after
/// checkout never touch a persisted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub user_id: i64,
    pub branch_id: i64,
    pub address_id: i64,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub offer_id: Option<i64>,
    pub loyalty_points_earned: i64,
    pub delivery_id: Option<i64>,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item — `item_name` / `unit_price` snapshot the menu item
/// at checkout time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub item_name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// Add-on attached to an order line (snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemAddOn {
    pub id: i64,
    pub order_item_id: i64,
    pub add_on_id: i64,
    pub add_on_name: String,
    pub price: f64,
}

/// Status history row — one per transition, `from_status` NULL for the
/// initial `pending` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderStatusHistory {
    pub id: i64,
    pub order_id: i64,
    pub from_status: Option<OrderStatus>,
    pub to_status: OrderStatus,
    pub changed_by: i64,
    pub note: Option<String>,
    pub created_at: i64,
}

// ==================== Request / View payloads ====================

/// One cart line in a create-order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub menu_item_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub add_on_ids: Vec<i64>,
}

/// Create order request (顾客下单入参)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub branch_id: i64,
    pub address_id: i64,
    pub items: Vec<CartLine>,
    pub offer_code: Option<String>,
    pub note: Option<String>,
}

/// Order line with its add-ons (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    #[serde(flatten)]
    pub item: OrderItem,
    pub add_ons: Vec<OrderItemAddOn>,
}

/// Full order detail: order + lines + status history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemView>,
    pub history: Vec<OrderStatusHistory>,
}

/// Status change request (admin / driver surface)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusChange {
    pub status: OrderStatus,
    pub note: Option<String>,
}
