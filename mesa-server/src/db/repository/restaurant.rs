//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str = "SELECT id, name, description, logo_url, is_active, total_orders, total_revenue, created_at, updated_at FROM restaurants";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE is_active = 1 ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Restaurant>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Admin listing — includes deactivated rows
pub async fn find_all_admin(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Restaurant>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO restaurants (id, name, description, logo_url, is_active, total_orders, total_revenue, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, 0, 0, ?5, ?5)",
    )
    .bind(id)
    .bind(data.name)
    .bind(data.description)
    .bind(data.logo_url)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE restaurants SET name = COALESCE(?1, name), description = COALESCE(?2, description), logo_url = COALESCE(?3, logo_url), is_active = COALESCE(?4, is_active), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.logo_url)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE restaurants SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Bump denormalized order counters, inside the order-creation transaction
pub async fn record_order(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    restaurant_id: i64,
    total: f64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE restaurants SET total_orders = total_orders + 1, total_revenue = total_revenue + ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(total)
    .bind(now)
    .bind(restaurant_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
