//! User Address API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::address as address_repo;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{UserAddress, UserAddressCreate, UserAddressUpdate};

/// GET /api/addresses - 我的地址（默认在前）
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<UserAddress>>> {
    let rows = address_repo::find_by_user(state.pool(), user.id).await?;
    Ok(Json(rows))
}

/// POST /api/addresses - 新增地址
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<UserAddressCreate>,
) -> AppResult<Json<UserAddress>> {
    validate_required_text(&req.label, "label", MAX_NAME_LEN)?;
    validate_required_text(&req.street, "street", MAX_ADDRESS_LEN)?;
    validate_required_text(&req.city, "city", MAX_NAME_LEN)?;
    validate_required_text(&req.postal_code, "postal_code", MAX_SHORT_TEXT_LEN)?;

    let row = address_repo::create(state.pool(), user.id, req).await?;
    Ok(Json(row))
}

/// PUT /api/addresses/:id - 更新地址（可切换默认）
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UserAddressUpdate>,
) -> AppResult<Json<UserAddress>> {
    validate_optional_text(&req.label, "label", MAX_NAME_LEN)?;
    validate_optional_text(&req.street, "street", MAX_ADDRESS_LEN)?;
    validate_optional_text(&req.city, "city", MAX_NAME_LEN)?;
    validate_optional_text(&req.postal_code, "postal_code", MAX_SHORT_TEXT_LEN)?;

    let row = address_repo::update(state.pool(), id, user.id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/addresses/:id - 删除地址
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = address_repo::delete(state.pool(), id, user.id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::AddressNotFound));
    }
    Ok(Json(true))
}
