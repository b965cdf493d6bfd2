//! Review Model

use serde::{Deserialize, Serialize};

/// Review entity — one per (user, order, menu_item), only for delivered
/// orders containing the item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub order_id: i64,
    pub menu_item_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
}
