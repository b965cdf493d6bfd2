//! Menu Category Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
use sqlx::SqlitePool;

const CATEGORY_SELECT: &str = "SELECT id, branch_id, name, sort_order, is_active, created_at, updated_at FROM menu_categories";

pub async fn find_by_branch(pool: &SqlitePool, branch_id: i64) -> RepoResult<Vec<MenuCategory>> {
    let sql = format!("{CATEGORY_SELECT} WHERE branch_id = ? AND is_active = 1 ORDER BY sort_order");
    let rows = sqlx::query_as::<_, MenuCategory>(&sql)
        .bind(branch_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuCategory>> {
    let sql = format!("{CATEGORY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, MenuCategory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: MenuCategoryCreate) -> RepoResult<MenuCategory> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO menu_categories (id, branch_id, name, sort_order, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)",
    )
    .bind(id)
    .bind(data.branch_id)
    .bind(data.name)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuCategoryUpdate) -> RepoResult<MenuCategory> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_categories SET name = COALESCE(?1, name), sort_order = COALESCE(?2, sort_order), is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Soft delete — refused while the category still has active menu items
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let item_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM menu_items WHERE category_id = ? AND is_active = 1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if item_count > 0 {
        return Err(RepoError::business(ErrorCode::CategoryHasItems));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_categories SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
