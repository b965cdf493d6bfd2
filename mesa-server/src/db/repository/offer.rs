//! Offer (coupon) Repository

use super::{RepoError, RepoResult};
use shared::models::{Offer, OfferCreate, OfferUpdate};
use sqlx::SqlitePool;

const OFFER_SELECT: &str = "SELECT id, code, name, discount_type, discount_value, max_discount_amount, min_order_amount, starts_at, ends_at, usage_limit, per_user_limit, times_used, branch_id, category_id, menu_item_id, is_active, created_at, updated_at FROM offers";

pub async fn find_all_admin(pool: &SqlitePool) -> RepoResult<Vec<Offer>> {
    let sql = format!("{OFFER_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Offer>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Currently-running offers (customer surface)
pub async fn find_running(pool: &SqlitePool, now: i64) -> RepoResult<Vec<Offer>> {
    let sql = format!(
        "{OFFER_SELECT} WHERE is_active = 1 AND starts_at <= ? AND ends_at > ? ORDER BY ends_at"
    );
    let rows = sqlx::query_as::<_, Offer>(&sql)
        .bind(now)
        .bind(now)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Offer>> {
    let sql = format!("{OFFER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Offer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Lookup by normalized code — callers uppercase/trim before calling
pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Offer>> {
    let sql = format!("{OFFER_SELECT} WHERE code = ?");
    let row = sqlx::query_as::<_, Offer>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: OfferCreate) -> RepoResult<Offer> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let code = data.code.trim().to_uppercase();
    sqlx::query(
        "INSERT INTO offers (id, code, name, discount_type, discount_value, max_discount_amount, min_order_amount, starts_at, ends_at, usage_limit, per_user_limit, times_used, branch_id, category_id, menu_item_id, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, ?12, ?13, ?14, 1, ?15, ?15)",
    )
    .bind(id)
    .bind(&code)
    .bind(data.name)
    .bind(data.discount_type)
    .bind(data.discount_value)
    .bind(data.max_discount_amount.unwrap_or(0.0))
    .bind(data.min_order_amount.unwrap_or(0.0))
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(data.usage_limit.unwrap_or(0))
    .bind(data.per_user_limit.unwrap_or(0))
    .bind(data.branch_id)
    .bind(data.category_id)
    .bind(data.menu_item_id)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Duplicate(format!("Offer code {code} already exists"))
        }
        other => other.into(),
    })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create offer".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: OfferUpdate) -> RepoResult<Offer> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE offers SET name = COALESCE(?1, name), discount_value = COALESCE(?2, discount_value), max_discount_amount = COALESCE(?3, max_discount_amount), min_order_amount = COALESCE(?4, min_order_amount), starts_at = COALESCE(?5, starts_at), ends_at = COALESCE(?6, ends_at), usage_limit = COALESCE(?7, usage_limit), per_user_limit = COALESCE(?8, per_user_limit), is_active = COALESCE(?9, is_active), updated_at = ?10 WHERE id = ?11",
    )
    .bind(data.name)
    .bind(data.discount_value)
    .bind(data.max_discount_amount)
    .bind(data.min_order_amount)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(data.usage_limit)
    .bind(data.per_user_limit)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Offer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Offer {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE offers SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Count the user's non-cancelled orders that redeemed this offer
pub async fn count_user_usage(pool: &SqlitePool, offer_id: i64, user_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE offer_id = ? AND user_id = ? AND status != 'cancelled'",
    )
    .bind(offer_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Claim one usage inside the order-creation transaction.
///
/// The guard re-checks the cap so that two orders racing for the last
/// slot cannot both claim it; returns false when the cap is exhausted.
pub async fn claim_usage(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    offer_id: i64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE offers SET times_used = times_used + 1, updated_at = ?1 WHERE id = ?2 AND (usage_limit = 0 OR times_used < usage_limit)",
    )
    .bind(now)
    .bind(offer_id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Give one usage back (order cancelled)
pub async fn release_usage(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    offer_id: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE offers SET times_used = MAX(0, times_used - 1), updated_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(offer_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Deactivate offers whose window has ended (background sweep).
/// Returns the number of rows touched.
pub async fn deactivate_expired(pool: &SqlitePool, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE offers SET is_active = 0, updated_at = ?1 WHERE is_active = 1 AND ends_at <= ?1",
    )
    .bind(now)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
