//! Delivery (driver) API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{branch as branch_repo, delivery as delivery_repo};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Delivery, DeliveryCreate, DeliveryUpdate};

/// GET /api/deliveries/by-branch/:branch_id - 门店的配送员
pub async fn list_by_branch(
    State(state): State<ServerState>,
    Path(branch_id): Path<i64>,
) -> AppResult<Json<Vec<Delivery>>> {
    let rows = delivery_repo::find_by_branch(state.pool(), branch_id).await?;
    Ok(Json(rows))
}

/// GET /api/deliveries/:id - 获取单个配送员
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Delivery>> {
    let row = delivery_repo::find_by_id(state.pool(), id)
        .await?
        .filter(|d| d.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::DriverNotFound))?;
    Ok(Json(row))
}

/// POST /api/deliveries - 录入配送员
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<DeliveryCreate>,
) -> AppResult<Json<Delivery>> {
    validate_required_text(&req.driver_name, "driver_name", MAX_NAME_LEN)?;
    validate_required_text(&req.driver_phone, "driver_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.vehicle_plate, "vehicle_plate", MAX_SHORT_TEXT_LEN)?;

    let pool = state.pool();
    branch_repo::find_by_id(pool, req.branch_id)
        .await?
        .filter(|b| b.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound))?;

    let row = delivery_repo::create(pool, req).await?;
    Ok(Json(row))
}

/// PUT /api/deliveries/:id - 更新配送员
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<DeliveryUpdate>,
) -> AppResult<Json<Delivery>> {
    validate_optional_text(&req.driver_name, "driver_name", MAX_NAME_LEN)?;
    validate_optional_text(&req.driver_phone, "driver_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.vehicle_plate, "vehicle_plate", MAX_SHORT_TEXT_LEN)?;

    let row = delivery_repo::update(state.pool(), id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/deliveries/:id - 移除配送员
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = delivery_repo::delete(state.pool(), id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::DriverNotFound));
    }
    Ok(Json(true))
}
