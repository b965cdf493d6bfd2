//! Menu Category API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", category_routes())
}

fn category_routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/by-branch/{branch_id}", get(handler::list_by_branch))
        .merge(
            Router::new()
                .route("/", post(handler::create))
                .route("/{id}", put(handler::update).delete(handler::delete))
                .route_layer(middleware::from_fn(require_admin)),
        )
}
