//! Menu Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{branch as branch_repo, category as category_repo};
use crate::services::bus::NotifyService;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::message::{EventType, MenuChangedPayload};
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};

/// GET /api/categories/by-branch/:branch_id - 某门店的分类
pub async fn list_by_branch(
    State(state): State<ServerState>,
    Path(branch_id): Path<i64>,
) -> AppResult<Json<Vec<MenuCategory>>> {
    let rows = category_repo::find_by_branch(state.pool(), branch_id).await?;
    Ok(Json(rows))
}

/// GET /api/categories/:id - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuCategory>> {
    let row = category_repo::find_by_id(state.pool(), id)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    Ok(Json(row))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<MenuCategoryCreate>,
) -> AppResult<Json<MenuCategory>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;

    let pool = state.pool();
    branch_repo::find_by_id(pool, req.branch_id)
        .await?
        .filter(|b| b.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound))?;

    let row = category_repo::create(pool, req).await?;
    broadcast_menu_change(&state.notify, row.branch_id, row.id);
    Ok(Json(row))
}

/// PUT /api/categories/:id - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<MenuCategoryUpdate>,
) -> AppResult<Json<MenuCategory>> {
    validate_optional_text(&req.name, "name", MAX_NAME_LEN)?;
    let row = category_repo::update(state.pool(), id, req).await?;
    broadcast_menu_change(&state.notify, row.branch_id, row.id);
    Ok(Json(row))
}

/// DELETE /api/categories/:id - 删除分类（仍有菜品时拒绝）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let pool = state.pool();
    let category = category_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let removed = category_repo::delete(pool, id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }
    broadcast_menu_change(&state.notify, category.branch_id, id);
    Ok(Json(true))
}

fn broadcast_menu_change(notify: &NotifyService, branch_id: i64, entity_id: i64) {
    notify.publish(
        EventType::MenuChanged,
        &MenuChangedPayload {
            branch_id,
            entity: "category".into(),
            entity_id,
        },
    );
}
