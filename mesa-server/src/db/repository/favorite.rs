//! Favorite Repository

use super::RepoResult;
use shared::models::{Favorite, FavoriteView, MenuItem};
use sqlx::SqlitePool;

/// Idempotent add — re-favoriting is a no-op
pub async fn add(pool: &SqlitePool, user_id: i64, menu_item_id: i64) -> RepoResult<bool> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO favorites (id, user_id, menu_item_id, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(id)
    .bind(user_id)
    .bind(menu_item_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn remove(pool: &SqlitePool, user_id: i64, menu_item_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND menu_item_id = ?")
        .bind(user_id)
        .bind(menu_item_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// List favorites with item data, newest first
pub async fn list_with_items(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<FavoriteView>> {
    let favorites = sqlx::query_as::<_, Favorite>(
        "SELECT id, user_id, menu_item_id, created_at FROM favorites WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT mi.id, mi.category_id, mi.name, mi.description, mi.image_url, mi.price, mi.is_available, mi.is_active, mi.sort_order, mi.rating_sum, mi.rating_count, mi.created_at, mi.updated_at FROM menu_items mi JOIN favorites f ON f.menu_item_id = mi.id WHERE f.user_id = ? AND mi.is_active = 1",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let by_id: std::collections::HashMap<i64, MenuItem> =
        items.into_iter().map(|i| (i.id, i)).collect();

    Ok(favorites
        .into_iter()
        .filter_map(|favorite| {
            by_id.get(&favorite.menu_item_id).map(|item| FavoriteView {
                favorite,
                item: item.clone(),
            })
        })
        .collect())
}
