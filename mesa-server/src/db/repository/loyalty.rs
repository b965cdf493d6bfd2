//! Loyalty Repository
//!
//! Accounts are created lazily; every balance mutation appends a ledger
//! row with `balance_after` inside the same transaction.

use super::{RepoError, RepoResult};
use crate::loyalty::tier_for_spend;
use shared::error::ErrorCode;
use shared::models::{LoyaltyAccount, LoyaltyTransaction, LoyaltyTxKind};
use sqlx::SqlitePool;

const ACCOUNT_SELECT: &str = "SELECT id, user_id, points_balance, lifetime_points, total_spent, tier, updated_at FROM loyalty_accounts";

const TX_SELECT: &str = "SELECT id, account_id, order_id, kind, points, balance_after, note, created_at FROM loyalty_transactions";

pub async fn ensure_account(pool: &SqlitePool, user_id: i64) -> RepoResult<LoyaltyAccount> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    // INSERT OR IGNORE: only inserts if the user has no account yet
    sqlx::query(
        "INSERT OR IGNORE INTO loyalty_accounts (id, user_id, points_balance, lifetime_points, total_spent, tier, updated_at) VALUES (?1, ?2, 0, 0, 0, 'bronze', ?3)",
    )
    .bind(id)
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to ensure loyalty account".into()))
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<LoyaltyAccount>> {
    let sql = format!("{ACCOUNT_SELECT} WHERE user_id = ?");
    let row = sqlx::query_as::<_, LoyaltyAccount>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_transactions(
    pool: &SqlitePool,
    account_id: i64,
    limit: i64,
) -> RepoResult<Vec<LoyaltyTransaction>> {
    let sql = format!("{TX_SELECT} WHERE account_id = ? ORDER BY created_at DESC LIMIT ?");
    let rows = sqlx::query_as::<_, LoyaltyTransaction>(&sql)
        .bind(account_id)
        .bind(limit.clamp(1, 200))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Credit earned points when an order is delivered.
///
/// Updates balance, lifetime points and cumulative spend, recomputes the
/// tier from the new spend, and appends an `earn` ledger row.
pub async fn credit_for_order(
    pool: &SqlitePool,
    user_id: i64,
    order_id: i64,
    points: i64,
    spent_amount: f64,
) -> RepoResult<LoyaltyAccount> {
    let account = ensure_account(pool, user_id).await?;
    let now = shared::util::now_millis();

    let new_balance = account.points_balance + points;
    let new_spent = account.total_spent + spent_amount;
    let tier = tier_for_spend(new_spent);

    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE loyalty_accounts SET points_balance = ?1, lifetime_points = lifetime_points + ?2, total_spent = ?3, tier = ?4, updated_at = ?5 WHERE id = ?6",
    )
    .bind(new_balance)
    .bind(points)
    .bind(new_spent)
    .bind(tier)
    .bind(now)
    .bind(account.id)
    .execute(&mut *tx)
    .await?;

    insert_transaction(
        &mut tx,
        account.id,
        Some(order_id),
        LoyaltyTxKind::Earn,
        points,
        new_balance,
        None,
    )
    .await?;

    tx.commit().await?;

    find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to credit loyalty points".into()))
}

/// Redeem points for a credit. The guard on `points_balance` keeps two
/// concurrent redemptions from spending the same points.
pub async fn redeem(
    pool: &SqlitePool,
    user_id: i64,
    points: i64,
) -> RepoResult<LoyaltyAccount> {
    let account = ensure_account(pool, user_id).await?;
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE loyalty_accounts SET points_balance = points_balance - ?1, updated_at = ?2 WHERE id = ?3 AND points_balance >= ?1",
    )
    .bind(points)
    .bind(now)
    .bind(account.id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::business(ErrorCode::InsufficientPoints));
    }

    let balance_after: i64 =
        sqlx::query_scalar("SELECT points_balance FROM loyalty_accounts WHERE id = ?")
            .bind(account.id)
            .fetch_one(&mut *tx)
            .await?;

    insert_transaction(
        &mut tx,
        account.id,
        None,
        LoyaltyTxKind::Redeem,
        -points,
        balance_after,
        None,
    )
    .await?;

    tx.commit().await?;

    find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to redeem loyalty points".into()))
}

async fn insert_transaction(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    account_id: i64,
    order_id: Option<i64>,
    kind: LoyaltyTxKind,
    points: i64,
    balance_after: i64,
    note: Option<&str>,
) -> RepoResult<()> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO loyalty_transactions (id, account_id, order_id, kind, points, balance_after, note, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(account_id)
    .bind(order_id)
    .bind(kind)
    .bind(points)
    .bind(balance_after)
    .bind(note)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
