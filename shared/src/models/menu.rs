//! Menu Models — categories, items and add-ons

use serde::{Deserialize, Serialize};

/// Menu category entity (菜单分类)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuCategory {
    pub id: i64,
    pub branch_id: i64,
    pub name: String,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryCreate {
    pub branch_id: i64,
    pub name: String,
    pub sort_order: Option<i64>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryUpdate {
    pub name: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

/// Menu item entity (菜品)
///
/// `rating_sum` / `rating_count` are denormalized and only mutated by the
/// review module. `is_available` is a quick out-of-stock toggle, distinct
/// from the soft-delete flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: f64,
    pub is_available: bool,
    pub is_active: bool,
    pub sort_order: i64,
    pub rating_sum: i64,
    pub rating_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    /// Average rating, 0.0 when unrated
    pub fn average_rating(&self) -> f64 {
        if self.rating_count == 0 {
            0.0
        } else {
            self.rating_sum as f64 / self.rating_count as f64
        }
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: f64,
    pub sort_order: Option<i64>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub is_available: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i64>,
}

/// Menu item add-on entity (加料)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemAddOn {
    pub id: i64,
    pub menu_item_id: i64,
    pub name: String,
    pub price: f64,
    pub is_active: bool,
}

/// Create add-on payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemAddOnCreate {
    pub name: String,
    pub price: f64,
}

/// Composed menu view: a category with its available items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryView {
    pub category: MenuCategory,
    pub items: Vec<MenuItemView>,
}

/// Menu item with its add-ons, as returned by the composed menu endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemView {
    #[serde(flatten)]
    pub item: MenuItem,
    pub add_ons: Vec<MenuItemAddOn>,
}
