//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::restaurant as restaurant_repo;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};

/// GET /api/restaurants - 获取所有上架餐厅
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let rows = restaurant_repo::find_all(state.pool()).await?;
    Ok(Json(rows))
}

/// GET /api/restaurants/admin/all - 管理端列表（含下架）
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let rows = restaurant_repo::find_all_admin(state.pool()).await?;
    Ok(Json(rows))
}

/// GET /api/restaurants/:id - 获取单个餐厅
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    let row = restaurant_repo::find_by_id(state.pool(), id)
        .await?
        .filter(|r| r.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    Ok(Json(row))
}

/// POST /api/restaurants - 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&req.logo_url, "logo_url", MAX_URL_LEN)?;

    let row = restaurant_repo::create(state.pool(), req).await?;
    Ok(Json(row))
}

/// PUT /api/restaurants/:id - 更新餐厅
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    validate_optional_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&req.logo_url, "logo_url", MAX_URL_LEN)?;

    let row = restaurant_repo::update(state.pool(), id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/restaurants/:id - 下架餐厅
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = restaurant_repo::delete(state.pool(), id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }
    Ok(Json(true))
}
