//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册/登录/登出/个人资料
//! - [`restaurants`] - 餐厅管理接口
//! - [`branches`] - 门店管理接口
//! - [`categories`] - 菜单分类管理接口
//! - [`menu_items`] - 菜品管理接口
//! - [`menu`] - 门店菜单聚合查询
//! - [`orders`] - 下单与订单流转
//! - [`offers`] - 优惠券管理接口
//! - [`deliveries`] - 配送员管理接口
//! - [`loyalty`] - 积分账户接口
//! - [`reviews`] - 菜品评价接口
//! - [`favorites`] - 收藏接口
//! - [`addresses`] - 收货地址接口
//! - [`events`] - 管理端事件流 (SSE)

pub mod addresses;
pub mod auth;
pub mod branches;
pub mod categories;
pub mod deliveries;
pub mod events;
pub mod favorites;
pub mod health;
pub mod loyalty;
pub mod menu;
pub mod menu_items;
pub mod offers;
pub mod orders;
pub mod restaurants;
pub mod reviews;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResult, ApiResponse};

/// 组装完整的应用路由
pub fn build_router(state: ServerState) -> Router {
    let x_request_id = http::HeaderName::from_static("x-request-id");

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(branches::router())
        .merge(categories::router())
        .merge(menu_items::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(offers::router())
        .merge(deliveries::router())
        .merge(loyalty::router())
        .merge(reviews::router())
        .merge(favorites::router())
        .merge(addresses::router())
        .merge(events::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(x_request_id))
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
