//! Branch API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/branches", branch_routes())
}

fn branch_routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route(
            "/by-restaurant/{restaurant_id}",
            get(handler::list_by_restaurant),
        )
        .merge(
            Router::new()
                .route("/", post(handler::create).get(handler::list_admin))
                .route("/{id}", put(handler::update).delete(handler::delete))
                .route_layer(middleware::from_fn(require_admin)),
        )
}
