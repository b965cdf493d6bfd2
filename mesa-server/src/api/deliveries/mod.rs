//! Delivery (driver) API 模块 — 管理端

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/deliveries", delivery_routes())
}

fn delivery_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/by-branch/{branch_id}", get(handler::list_by_branch))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route_layer(middleware::from_fn(require_admin))
}
