//! Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::review as review_repo;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_rating};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Review, ReviewCreate};

const ITEM_REVIEWS_LIMIT: i64 = 100;

/// GET /api/reviews/item/:menu_item_id - 菜品的评价（公开）
pub async fn list_by_item(
    State(state): State<ServerState>,
    Path(menu_item_id): Path<i64>,
) -> AppResult<Json<Vec<Review>>> {
    let rows = review_repo::list_by_item(state.pool(), menu_item_id, ITEM_REVIEWS_LIMIT).await?;
    Ok(Json(rows))
}

/// GET /api/reviews/mine - 我的评价
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Review>>> {
    let rows = review_repo::list_by_user(state.pool(), user.id).await?;
    Ok(Json(rows))
}

/// POST /api/reviews - 评价已送达订单中的菜品
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ReviewCreate>,
) -> AppResult<Json<Review>> {
    validate_rating(req.rating)?;
    validate_optional_text(&req.comment, "comment", MAX_NOTE_LEN)?;

    let row = review_repo::create(state.pool(), user.id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/reviews/:id - 删除自己的评价
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = review_repo::delete(state.pool(), id, user.id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::NotFound));
    }
    Ok(Json(true))
}
