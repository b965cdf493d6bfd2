//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::orders;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{CreateOrderRequest, Order, OrderDetail, OrderStatus, OrderStatusChange};

const DEFAULT_LIST_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct CancelOrderRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignDriverRequest {
    pub delivery_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct BranchOrdersQuery {
    pub status: Option<OrderStatus>,
    pub limit: Option<i64>,
}

/// POST /api/orders - 下单（核心流程）
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = orders::create_order(&state, &user, req).await?;
    Ok(Json(detail))
}

/// GET /api/orders - 我的订单
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let rows = order_repo::list_by_user(state.pool(), user.id, DEFAULT_LIST_LIMIT).await?;
    Ok(Json(rows))
}

/// GET /api/orders/:id - 订单详情（本人或管理员）
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order_repo::find_detail(state.pool(), id)
        .await?
        .filter(|d| d.order.user_id == user.id || user.is_admin())
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(detail))
}

/// POST /api/orders/:id/cancel - 顾客取消自己的订单
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<CancelOrderRequest>,
) -> AppResult<Json<Order>> {
    validate_optional_text(&req.note, "note", MAX_NOTE_LEN)?;
    let order = orders::status::cancel_own(&state, id, &user, req.note).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/status - 推进订单状态（管理端）
pub async fn change_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<OrderStatusChange>,
) -> AppResult<Json<Order>> {
    validate_optional_text(&req.note, "note", MAX_NOTE_LEN)?;
    let order = orders::status::advance(&state, id, req.status, &user, req.note).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/assign-driver - 指派配送员（管理端）
pub async fn assign_driver(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<AssignDriverRequest>,
) -> AppResult<Json<Order>> {
    let order = orders::status::assign_driver(&state, id, req.delivery_id, &user).await?;
    Ok(Json(order))
}

/// GET /api/orders/branch/:branch_id - 门店订单（管理端，可按状态过滤）
pub async fn list_by_branch(
    State(state): State<ServerState>,
    Path(branch_id): Path<i64>,
    Query(query): Query<BranchOrdersQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let rows = order_repo::list_by_branch(
        state.pool(),
        branch_id,
        query.status,
        query.limit.unwrap_or(DEFAULT_LIST_LIMIT),
    )
    .await?;
    Ok(Json(rows))
}
