//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{category as category_repo, menu_item as item_repo};
use crate::services::bus::NotifyService;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::message::{EventType, MenuChangedPayload};
use shared::models::{
    MenuItem, MenuItemAddOn, MenuItemAddOnCreate, MenuItemCreate, MenuItemUpdate,
};

/// GET /api/menu-items/by-category/:category_id - 分类下的菜品
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let rows = item_repo::find_by_category(state.pool(), category_id).await?;
    Ok(Json(rows))
}

/// GET /api/menu-items/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let row = item_repo::find_by_id(state.pool(), id)
        .await?
        .filter(|i| i.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;
    Ok(Json(row))
}

/// GET /api/menu-items/:id/add-ons - 菜品的加料
pub async fn list_add_ons(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<MenuItemAddOn>>> {
    let rows = item_repo::find_add_ons(state.pool(), id).await?;
    Ok(Json(rows))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&req.image_url, "image_url", MAX_URL_LEN)?;
    validate_non_negative(req.price, "price")?;

    let pool = state.pool();
    let category = category_repo::find_by_id(pool, req.category_id)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let row = item_repo::create(pool, req).await?;
    broadcast_menu_change(&state.notify, category.branch_id, row.id);
    Ok(Json(row))
}

/// PUT /api/menu-items/:id - 更新菜品（含上下架/估清）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    validate_optional_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&req.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(price) = req.price {
        validate_non_negative(price, "price")?;
    }

    let pool = state.pool();
    if let Some(category_id) = req.category_id {
        category_repo::find_by_id(pool, category_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    }

    let row = item_repo::update(pool, id, req).await?;
    let category = category_repo::find_by_id(pool, row.category_id).await?;
    if let Some(category) = category {
        broadcast_menu_change(&state.notify, category.branch_id, row.id);
    }
    Ok(Json(row))
}

/// DELETE /api/menu-items/:id - 下架菜品（加料一并删除）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let pool = state.pool();
    let item = item_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    let removed = item_repo::delete(pool, id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::MenuItemNotFound));
    }

    if let Some(category) = category_repo::find_by_id(pool, item.category_id).await? {
        broadcast_menu_change(&state.notify, category.branch_id, id);
    }
    Ok(Json(true))
}

/// POST /api/menu-items/:id/add-ons - 给菜品加一种加料
pub async fn create_add_on(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<MenuItemAddOnCreate>,
) -> AppResult<Json<MenuItemAddOn>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_non_negative(req.price, "price")?;

    let pool = state.pool();
    item_repo::find_by_id(pool, id)
        .await?
        .filter(|i| i.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    let row = item_repo::create_add_on(pool, id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/menu-items/:id/add-ons/:add_on_id - 删除加料
pub async fn delete_add_on(
    State(state): State<ServerState>,
    Path((id, add_on_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    let removed = item_repo::delete_add_on(state.pool(), id, add_on_id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::AddOnNotFound));
    }
    Ok(Json(true))
}

fn broadcast_menu_change(notify: &NotifyService, branch_id: i64, entity_id: i64) {
    notify.publish(
        EventType::MenuChanged,
        &MenuChangedPayload {
            branch_id,
            entity: "menu_item".into(),
            entity_id,
        },
    );
}
