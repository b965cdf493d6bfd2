//! Loyalty API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::loyalty as loyalty_repo;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{LoyaltyAccount, LoyaltyRedeemRequest, LoyaltyRedeemResult, LoyaltyTransaction};

/// 兑换单位：100 积分 = 1.00 货币
const POINTS_PER_CREDIT_UNIT: i64 = 100;
const TX_LIST_LIMIT: i64 = 100;

/// GET /api/loyalty/me - 我的积分账户（懒创建）
pub async fn my_account(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<LoyaltyAccount>> {
    let account = loyalty_repo::ensure_account(state.pool(), user.id).await?;
    Ok(Json(account))
}

/// GET /api/loyalty/transactions - 我的积分流水
pub async fn my_transactions(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<LoyaltyTransaction>>> {
    let pool = state.pool();
    let account = loyalty_repo::ensure_account(pool, user.id).await?;
    let rows = loyalty_repo::list_transactions(pool, account.id, TX_LIST_LIMIT).await?;
    Ok(Json(rows))
}

/// POST /api/loyalty/redeem - 积分换抵扣额
///
/// 最少 100 分，且必须是 100 的整数倍。
pub async fn redeem(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<LoyaltyRedeemRequest>,
) -> AppResult<Json<LoyaltyRedeemResult>> {
    if req.points < POINTS_PER_CREDIT_UNIT || req.points % POINTS_PER_CREDIT_UNIT != 0 {
        return Err(AppError::new(ErrorCode::InvalidRedeemAmount));
    }

    let account = loyalty_repo::redeem(state.pool(), user.id, req.points).await?;

    let credit = req.points as f64 / POINTS_PER_CREDIT_UNIT as f64;
    tracing::info!(
        user_id = user.id,
        points = req.points,
        credit,
        "Loyalty points redeemed"
    );

    Ok(Json(LoyaltyRedeemResult {
        credit,
        points_spent: req.points,
        points_balance: account.points_balance,
    }))
}
