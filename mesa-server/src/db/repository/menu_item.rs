//! Menu Item Repository
//!
//! Items, their add-ons, and the composed branch menu query.

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemAddOn, MenuItemAddOnCreate, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;
use std::collections::HashMap;

const ITEM_SELECT: &str = "SELECT id, category_id, name, description, image_url, price, is_available, is_active, sort_order, rating_sum, rating_count, created_at, updated_at FROM menu_items";

const ADD_ON_SELECT: &str =
    "SELECT id, menu_item_id, name, price, is_active FROM menu_item_add_ons";

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{ITEM_SELECT} WHERE category_id = ? AND is_active = 1 ORDER BY sort_order");
    let rows = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Fetch the distinct menu items referenced by a cart, keyed by id.
///
/// Returns every matching row regardless of availability; the order
/// use case decides which absences are errors.
pub async fn find_by_ids_for_branch(
    pool: &SqlitePool,
    ids: &[i64],
    branch_id: i64,
) -> RepoResult<HashMap<i64, MenuItem>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT mi.id, mi.category_id, mi.name, mi.description, mi.image_url, mi.price, mi.is_available, mi.is_active, mi.sort_order, mi.rating_sum, mi.rating_count, mi.created_at, mi.updated_at FROM menu_items mi JOIN menu_categories mc ON mi.category_id = mc.id WHERE mi.id IN ({placeholders}) AND mc.branch_id = ?"
    );
    let mut query = sqlx::query_as::<_, MenuItem>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows = query.bind(branch_id).fetch_all(pool).await?;
    Ok(rows.into_iter().map(|item| (item.id, item)).collect())
}

/// Every orderable item of a branch in one query (composed menu)
pub async fn find_available_by_branch(
    pool: &SqlitePool,
    branch_id: i64,
) -> RepoResult<Vec<MenuItem>> {
    let rows = sqlx::query_as::<_, MenuItem>(
        "SELECT mi.id, mi.category_id, mi.name, mi.description, mi.image_url, mi.price, mi.is_available, mi.is_active, mi.sort_order, mi.rating_sum, mi.rating_count, mi.created_at, mi.updated_at FROM menu_items mi JOIN menu_categories mc ON mi.category_id = mc.id WHERE mc.branch_id = ? AND mc.is_active = 1 AND mi.is_active = 1 AND mi.is_available = 1 ORDER BY mi.sort_order",
    )
    .bind(branch_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO menu_items (id, category_id, name, description, image_url, price, is_available, is_active, sort_order, rating_sum, rating_count, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, 1, ?7, 0, 0, ?8, ?8)",
    )
    .bind(id)
    .bind(data.category_id)
    .bind(data.name)
    .bind(data.description)
    .bind(data.image_url)
    .bind(data.price)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_items SET category_id = COALESCE(?1, category_id), name = COALESCE(?2, name), description = COALESCE(?3, description), image_url = COALESCE(?4, image_url), price = COALESCE(?5, price), is_available = COALESCE(?6, is_available), is_active = COALESCE(?7, is_active), sort_order = COALESCE(?8, sort_order), updated_at = ?9 WHERE id = ?10",
    )
    .bind(data.category_id)
    .bind(data.name)
    .bind(data.description)
    .bind(data.image_url)
    .bind(data.price)
    .bind(data.is_available)
    .bind(data.is_active)
    .bind(data.sort_order)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Soft delete the item and hard delete its add-ons
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM menu_item_add_ons WHERE menu_item_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query(
        "UPDATE menu_items SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}

// ==================== Add-ons ====================

pub async fn find_add_ons(pool: &SqlitePool, menu_item_id: i64) -> RepoResult<Vec<MenuItemAddOn>> {
    let sql = format!("{ADD_ON_SELECT} WHERE menu_item_id = ? AND is_active = 1 ORDER BY id");
    let rows = sqlx::query_as::<_, MenuItemAddOn>(&sql)
        .bind(menu_item_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch add-ons by id, unfiltered; the order use case checks ownership
/// and active flags per line.
pub async fn find_add_ons_by_ids(
    pool: &SqlitePool,
    ids: &[i64],
) -> RepoResult<HashMap<i64, MenuItemAddOn>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("{ADD_ON_SELECT} WHERE id IN ({placeholders})");
    let mut query = sqlx::query_as::<_, MenuItemAddOn>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|a| (a.id, a)).collect())
}

/// Add-ons for a set of items, grouped by item id (composed menu query)
pub async fn find_add_ons_for_items(
    pool: &SqlitePool,
    item_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<MenuItemAddOn>>> {
    if item_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let placeholders = vec!["?"; item_ids.len()].join(", ");
    let sql = format!(
        "{ADD_ON_SELECT} WHERE menu_item_id IN ({placeholders}) AND is_active = 1 ORDER BY id"
    );
    let mut query = sqlx::query_as::<_, MenuItemAddOn>(&sql);
    for id in item_ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;
    let mut grouped: HashMap<i64, Vec<MenuItemAddOn>> = HashMap::new();
    for add_on in rows {
        grouped.entry(add_on.menu_item_id).or_default().push(add_on);
    }
    Ok(grouped)
}

pub async fn create_add_on(
    pool: &SqlitePool,
    menu_item_id: i64,
    data: MenuItemAddOnCreate,
) -> RepoResult<MenuItemAddOn> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO menu_item_add_ons (id, menu_item_id, name, price, is_active) VALUES (?1, ?2, ?3, ?4, 1)",
    )
    .bind(id)
    .bind(menu_item_id)
    .bind(data.name)
    .bind(data.price)
    .execute(pool)
    .await?;

    let sql = format!("{ADD_ON_SELECT} WHERE id = ?");
    sqlx::query_as::<_, MenuItemAddOn>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create add-on".into()))
}

pub async fn delete_add_on(pool: &SqlitePool, menu_item_id: i64, add_on_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item_add_ons WHERE id = ? AND menu_item_id = ?")
        .bind(add_on_id)
        .bind(menu_item_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Apply a rating delta inside the review transaction
pub async fn apply_rating_delta(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    menu_item_id: i64,
    sum_delta: i64,
    count_delta: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE menu_items SET rating_sum = rating_sum + ?1, rating_count = rating_count + ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(sum_delta)
    .bind(count_delta)
    .bind(now)
    .bind(menu_item_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
