//! Order API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list_mine))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", post(handler::cancel))
        .merge(
            Router::new()
                .route("/{id}/status", post(handler::change_status))
                .route("/{id}/assign-driver", post(handler::assign_driver))
                .route("/branch/{branch_id}", get(handler::list_by_branch))
                .route_layer(middleware::from_fn(require_admin)),
        )
}
