//! Restaurant API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", restaurant_routes())
}

fn restaurant_routes() -> Router<ServerState> {
    // 浏览接口公开；管理接口叠加 require_admin
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .merge(
            Router::new()
                .route("/", post(handler::create))
                .route(
                    "/{id}",
                    axum::routing::put(handler::update).delete(handler::delete),
                )
                .route("/admin/all", get(handler::list_admin))
                .route_layer(middleware::from_fn(require_admin)),
        )
}
