//! Branch Repository

use super::{RepoError, RepoResult};
use shared::models::{Branch, BranchCreate, BranchUpdate};
use sqlx::SqlitePool;

const BRANCH_SELECT: &str = "SELECT id, restaurant_id, name, address, phone, delivery_radius_km, delivery_fee, min_order_amount, opens_at, closes_at, is_active, total_orders, total_revenue, created_at, updated_at FROM branches";

pub async fn find_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<Branch>> {
    let sql = format!("{BRANCH_SELECT} WHERE restaurant_id = ? AND is_active = 1 ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Branch>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_all_admin(pool: &SqlitePool) -> RepoResult<Vec<Branch>> {
    let sql = format!("{BRANCH_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Branch>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Branch>> {
    let sql = format!("{BRANCH_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Branch>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: BranchCreate) -> RepoResult<Branch> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO branches (id, restaurant_id, name, address, phone, delivery_radius_km, delivery_fee, min_order_amount, opens_at, closes_at, is_active, total_orders, total_revenue, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1, 0, 0, ?11, ?11)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(data.name)
    .bind(data.address)
    .bind(data.phone)
    .bind(data.delivery_radius_km.unwrap_or(5.0))
    .bind(data.delivery_fee.unwrap_or(0.0))
    .bind(data.min_order_amount.unwrap_or(0.0))
    .bind(data.opens_at)
    .bind(data.closes_at)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create branch".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: BranchUpdate) -> RepoResult<Branch> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE branches SET name = COALESCE(?1, name), address = COALESCE(?2, address), phone = COALESCE(?3, phone), delivery_radius_km = COALESCE(?4, delivery_radius_km), delivery_fee = COALESCE(?5, delivery_fee), min_order_amount = COALESCE(?6, min_order_amount), opens_at = COALESCE(?7, opens_at), closes_at = COALESCE(?8, closes_at), is_active = COALESCE(?9, is_active), updated_at = ?10 WHERE id = ?11",
    )
    .bind(data.name)
    .bind(data.address)
    .bind(data.phone)
    .bind(data.delivery_radius_km)
    .bind(data.delivery_fee)
    .bind(data.min_order_amount)
    .bind(data.opens_at)
    .bind(data.closes_at)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Branch {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Branch {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE branches SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
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
    branch_id: i64,
    total: f64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE branches SET total_orders = total_orders + 1, total_revenue = total_revenue + ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(total)
    .bind(now)
    .bind(branch_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
