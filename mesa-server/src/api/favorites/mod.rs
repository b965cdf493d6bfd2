//! Favorite API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/favorites", favorite_routes())
}

fn favorite_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{menu_item_id}", post(handler::add))
        .route("/{menu_item_id}", delete(handler::remove))
}
