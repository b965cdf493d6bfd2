//! Branch API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{branch as branch_repo, restaurant as restaurant_repo};
use crate::utils::time::parse_hhmm;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Branch, BranchCreate, BranchUpdate};

/// GET /api/branches/by-restaurant/:restaurant_id - 某餐厅的门店
pub async fn list_by_restaurant(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<Vec<Branch>>> {
    let pool = state.pool();
    restaurant_repo::find_by_id(pool, restaurant_id)
        .await?
        .filter(|r| r.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    let rows = branch_repo::find_by_restaurant(pool, restaurant_id).await?;
    Ok(Json(rows))
}

/// GET /api/branches - 管理端列表（含下架）
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<Branch>>> {
    let rows = branch_repo::find_all_admin(state.pool()).await?;
    Ok(Json(rows))
}

/// GET /api/branches/:id - 获取单个门店
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Branch>> {
    let row = branch_repo::find_by_id(state.pool(), id)
        .await?
        .filter(|b| b.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound))?;
    Ok(Json(row))
}

/// POST /api/branches - 创建门店
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<BranchCreate>,
) -> AppResult<Json<Branch>> {
    validate_branch_fields(
        Some(&req.name),
        Some(&req.address),
        &req.phone,
        req.delivery_radius_km,
        req.delivery_fee,
        req.min_order_amount,
        Some(&req.opens_at),
        Some(&req.closes_at),
    )?;

    let pool = state.pool();
    restaurant_repo::find_by_id(pool, req.restaurant_id)
        .await?
        .filter(|r| r.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let row = branch_repo::create(pool, req).await?;
    Ok(Json(row))
}

/// PUT /api/branches/:id - 更新门店
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<BranchUpdate>,
) -> AppResult<Json<Branch>> {
    validate_branch_fields(
        req.name.as_deref(),
        req.address.as_deref(),
        &req.phone,
        req.delivery_radius_km,
        req.delivery_fee,
        req.min_order_amount,
        req.opens_at.as_deref(),
        req.closes_at.as_deref(),
    )?;

    let row = branch_repo::update(state.pool(), id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/branches/:id - 下架门店
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = branch_repo::delete(state.pool(), id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::BranchNotFound));
    }
    Ok(Json(true))
}

#[allow(clippy::too_many_arguments)]
fn validate_branch_fields(
    name: Option<&str>,
    address: Option<&str>,
    phone: &Option<String>,
    delivery_radius_km: Option<f64>,
    delivery_fee: Option<f64>,
    min_order_amount: Option<f64>,
    opens_at: Option<&str>,
    closes_at: Option<&str>,
) -> AppResult<()> {
    if let Some(name) = name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(address) = address {
        validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
    }
    validate_optional_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    if let Some(radius) = delivery_radius_km {
        validate_non_negative(radius, "delivery_radius_km")?;
    }
    if let Some(fee) = delivery_fee {
        validate_non_negative(fee, "delivery_fee")?;
    }
    if let Some(min) = min_order_amount {
        validate_non_negative(min, "min_order_amount")?;
    }
    // 营业时间必须可解析
    if let Some(opens) = opens_at {
        parse_hhmm(opens)?;
    }
    if let Some(closes) = closes_at {
        parse_hhmm(closes)?;
    }
    Ok(())
}
