//! Delivery (driver) Repository

use super::{RepoError, RepoResult};
use shared::models::{Delivery, DeliveryCreate, DeliveryUpdate};
use sqlx::SqlitePool;

const DELIVERY_SELECT: &str = "SELECT id, branch_id, driver_name, driver_phone, vehicle_plate, is_available, is_active, total_deliveries, created_at, updated_at FROM deliveries";

pub async fn find_by_branch(pool: &SqlitePool, branch_id: i64) -> RepoResult<Vec<Delivery>> {
    let sql = format!("{DELIVERY_SELECT} WHERE branch_id = ? AND is_active = 1 ORDER BY driver_name");
    let rows = sqlx::query_as::<_, Delivery>(&sql)
        .bind(branch_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Delivery>> {
    let sql = format!("{DELIVERY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Delivery>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: DeliveryCreate) -> RepoResult<Delivery> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO deliveries (id, branch_id, driver_name, driver_phone, vehicle_plate, is_available, is_active, total_deliveries, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, 1, 0, ?6, ?6)",
    )
    .bind(id)
    .bind(data.branch_id)
    .bind(data.driver_name)
    .bind(data.driver_phone)
    .bind(data.vehicle_plate)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create delivery driver".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DeliveryUpdate) -> RepoResult<Delivery> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE deliveries SET driver_name = COALESCE(?1, driver_name), driver_phone = COALESCE(?2, driver_phone), vehicle_plate = COALESCE(?3, vehicle_plate), is_available = COALESCE(?4, is_available), is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.driver_name)
    .bind(data.driver_phone)
    .bind(data.vehicle_plate)
    .bind(data.is_available)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Delivery {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Delivery {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE deliveries SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Claim an available driver inside the assignment transaction.
/// Returns false when the driver was taken or deactivated meanwhile.
pub async fn claim_driver(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: i64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE deliveries SET is_available = 0, updated_at = ?1 WHERE id = ?2 AND is_available = 1 AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Release a driver when the carried order reaches a terminal state.
/// `completed` additionally bumps the delivery counter.
pub async fn release_driver(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: i64,
    completed: bool,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    if completed {
        sqlx::query(
            "UPDATE deliveries SET is_available = 1, total_deliveries = total_deliveries + 1, updated_at = ?1 WHERE id = ?2",
        )
        .bind(now)
        .bind(id)
        .execute(&mut **tx)
        .await?;
    } else {
        sqlx::query("UPDATE deliveries SET is_available = 1, updated_at = ?1 WHERE id = ?2")
            .bind(now)
            .bind(id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
