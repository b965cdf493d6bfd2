//! Review Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Review, ReviewCreate};
use sqlx::SqlitePool;

const REVIEW_SELECT: &str = "SELECT id, user_id, order_id, menu_item_id, rating, comment, is_active, created_at FROM reviews";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Review>> {
    let sql = format!("{REVIEW_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Review>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_by_item(pool: &SqlitePool, menu_item_id: i64, limit: i64) -> RepoResult<Vec<Review>> {
    let sql = format!(
        "{REVIEW_SELECT} WHERE menu_item_id = ? AND is_active = 1 ORDER BY created_at DESC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, Review>(&sql)
        .bind(menu_item_id)
        .bind(limit.clamp(1, 200))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Review>> {
    let sql = format!("{REVIEW_SELECT} WHERE user_id = ? AND is_active = 1 ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Review>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Create a review after checking eligibility: the order must belong to
/// the user, be delivered, and contain the item. The insert and the
/// rating counters move in one transaction.
pub async fn create(pool: &SqlitePool, user_id: i64, data: ReviewCreate) -> RepoResult<Review> {
    let eligible: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders o JOIN order_items oi ON oi.order_id = o.id WHERE o.id = ?1 AND o.user_id = ?2 AND o.status = 'delivered' AND oi.menu_item_id = ?3",
    )
    .bind(data.order_id)
    .bind(user_id)
    .bind(data.menu_item_id)
    .fetch_one(pool)
    .await?;
    if eligible == 0 {
        return Err(RepoError::business(ErrorCode::ReviewNotAllowed));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO reviews (id, user_id, order_id, menu_item_id, rating, comment, is_active, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7)",
    )
    .bind(id)
    .bind(user_id)
    .bind(data.order_id)
    .bind(data.menu_item_id)
    .bind(data.rating)
    .bind(data.comment)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::business(ErrorCode::ReviewAlreadyExists)
        }
        other => other.into(),
    })?;

    super::menu_item::apply_rating_delta(&mut tx, data.menu_item_id, data.rating, 1).await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create review".into()))
}

/// Soft delete own review, rolling its rating back out of the item
pub async fn delete(pool: &SqlitePool, id: i64, user_id: i64) -> RepoResult<bool> {
    let Some(review) = find_by_id(pool, id).await? else {
        return Ok(false);
    };
    if review.user_id != user_id || !review.is_active {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let rows = sqlx::query("UPDATE reviews SET is_active = 0 WHERE id = ? AND is_active = 1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Ok(false);
    }

    super::menu_item::apply_rating_delta(&mut tx, review.menu_item_id, -review.rating, -1).await?;

    tx.commit().await?;
    Ok(true)
}
