//! Favorite Model

use serde::{Deserialize, Serialize};

use super::MenuItem;

/// Favorite entity — unique (user, menu_item) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub menu_item_id: i64,
    pub created_at: i64,
}

/// Favorite with the item data for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteView {
    pub favorite: Favorite,
    pub item: MenuItem,
}
