//! User Address Repository

use super::{RepoError, RepoResult};
use shared::models::{UserAddress, UserAddressCreate, UserAddressUpdate};
use sqlx::SqlitePool;

const ADDRESS_SELECT: &str = "SELECT id, user_id, label, street, city, postal_code, latitude, longitude, is_default, is_active, created_at, updated_at FROM user_addresses";

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<UserAddress>> {
    let sql = format!(
        "{ADDRESS_SELECT} WHERE user_id = ? AND is_active = 1 ORDER BY is_default DESC, created_at DESC"
    );
    let rows = sqlx::query_as::<_, UserAddress>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Lookup scoped to the owner — a foreign id behaves like a missing row
pub async fn find_owned(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> RepoResult<Option<UserAddress>> {
    let sql = format!("{ADDRESS_SELECT} WHERE id = ? AND user_id = ? AND is_active = 1");
    let row = sqlx::query_as::<_, UserAddress>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    data: UserAddressCreate,
) -> RepoResult<UserAddress> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let is_default = data.is_default.unwrap_or(false);

    let mut tx = pool.begin().await?;

    if is_default {
        clear_default(&mut tx, user_id).await?;
    }

    sqlx::query(
        "INSERT INTO user_addresses (id, user_id, label, street, city, postal_code, latitude, longitude, is_default, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1, ?10, ?10)",
    )
    .bind(id)
    .bind(user_id)
    .bind(data.label)
    .bind(data.street)
    .bind(data.city)
    .bind(data.postal_code)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(is_default)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_owned(pool, id, user_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create address".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    data: UserAddressUpdate,
) -> RepoResult<UserAddress> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    if data.is_default == Some(true) {
        clear_default(&mut tx, user_id).await?;
    }

    let rows = sqlx::query(
        "UPDATE user_addresses SET label = COALESCE(?1, label), street = COALESCE(?2, street), city = COALESCE(?3, city), postal_code = COALESCE(?4, postal_code), latitude = COALESCE(?5, latitude), longitude = COALESCE(?6, longitude), is_default = COALESCE(?7, is_default), updated_at = ?8 WHERE id = ?9 AND user_id = ?10 AND is_active = 1",
    )
    .bind(data.label)
    .bind(data.street)
    .bind(data.city)
    .bind(data.postal_code)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(data.is_default)
    .bind(now)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Address {id} not found")));
    }

    tx.commit().await?;

    find_owned(pool, id, user_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Address {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64, user_id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE user_addresses SET is_default = 0, is_active = 0, updated_at = ? WHERE id = ? AND user_id = ? AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Single-default invariant: clear the previous default inside the same
/// transaction that sets a new one
async fn clear_default(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE user_addresses SET is_default = 0, updated_at = ?1 WHERE user_id = ?2 AND is_default = 1",
    )
    .bind(now)
    .bind(user_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
