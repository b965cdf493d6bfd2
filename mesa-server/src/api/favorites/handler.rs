//! Favorite API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{favorite as favorite_repo, menu_item as item_repo};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::FavoriteView;

/// GET /api/favorites - 我的收藏（含菜品数据）
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<FavoriteView>>> {
    let rows = favorite_repo::list_with_items(state.pool(), user.id).await?;
    Ok(Json(rows))
}

/// POST /api/favorites/:menu_item_id - 收藏菜品（幂等）
pub async fn add(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(menu_item_id): Path<i64>,
) -> AppResult<Json<bool>> {
    let pool = state.pool();
    item_repo::find_by_id(pool, menu_item_id)
        .await?
        .filter(|i| i.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    let added = favorite_repo::add(pool, user.id, menu_item_id).await?;
    Ok(Json(added))
}

/// DELETE /api/favorites/:menu_item_id - 取消收藏
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(menu_item_id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = favorite_repo::remove(state.pool(), user.id, menu_item_id).await?;
    Ok(Json(removed))
}
