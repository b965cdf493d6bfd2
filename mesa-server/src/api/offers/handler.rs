//! Offer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::offer as offer_repo;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::message::{EventType, OfferChangedPayload};
use shared::models::{DiscountType, Offer, OfferCreate, OfferUpdate};

/// GET /api/offers/running - 当前进行中的优惠（公开）
pub async fn list_running(State(state): State<ServerState>) -> AppResult<Json<Vec<Offer>>> {
    let now = shared::util::now_millis();
    let rows = offer_repo::find_running(state.pool(), now).await?;
    Ok(Json(rows))
}

/// GET /api/offers - 管理端列表
pub async fn list_admin(State(state): State<ServerState>) -> AppResult<Json<Vec<Offer>>> {
    let rows = offer_repo::find_all_admin(state.pool()).await?;
    Ok(Json(rows))
}

/// GET /api/offers/:id - 获取单个优惠
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Offer>> {
    let row = offer_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OfferNotFound))?;
    Ok(Json(row))
}

/// POST /api/offers - 创建优惠
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<OfferCreate>,
) -> AppResult<Json<Offer>> {
    validate_required_text(&req.code, "code", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_non_negative(req.discount_value, "discount_value")?;
    if req.discount_type == DiscountType::Percentage && req.discount_value > 100.0 {
        return Err(AppError::validation("percentage discount cannot exceed 100"));
    }
    if req.ends_at <= req.starts_at {
        return Err(AppError::validation("ends_at must be after starts_at"));
    }
    // 作用域最多一个维度
    let scopes = [
        req.branch_id.is_some(),
        req.category_id.is_some(),
        req.menu_item_id.is_some(),
    ];
    if scopes.iter().filter(|s| **s).count() > 1 {
        return Err(AppError::validation(
            "offer may target at most one of branch, category or menu item",
        ));
    }

    let row = offer_repo::create(state.pool(), req).await?;
    broadcast(&state, &row);
    Ok(Json(row))
}

/// PUT /api/offers/:id - 更新优惠
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<OfferUpdate>,
) -> AppResult<Json<Offer>> {
    if let Some(value) = req.discount_value {
        validate_non_negative(value, "discount_value")?;
    }
    let row = offer_repo::update(state.pool(), id, req).await?;
    broadcast(&state, &row);
    Ok(Json(row))
}

/// DELETE /api/offers/:id - 停用优惠
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let pool = state.pool();
    let removed = offer_repo::delete(pool, id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::OfferNotFound));
    }
    if let Some(row) = offer_repo::find_by_id(pool, id).await? {
        broadcast(&state, &row);
    }
    Ok(Json(true))
}

fn broadcast(state: &ServerState, offer: &Offer) {
    state.notify.publish(
        EventType::OfferChanged,
        &OfferChangedPayload {
            offer_id: offer.id,
            code: offer.code.clone(),
            is_active: offer.is_active,
        },
    );
}
