//! Menu Item API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu-items", item_routes())
}

fn item_routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/by-category/{category_id}", get(handler::list_by_category))
        .route("/{id}/add-ons", get(handler::list_add_ons))
        .merge(
            Router::new()
                .route("/", post(handler::create))
                .route("/{id}", put(handler::update).delete(handler::delete))
                .route("/{id}/add-ons", post(handler::create_add_on))
                .route(
                    "/{id}/add-ons/{add_on_id}",
                    axum::routing::delete(handler::delete_add_on),
                )
                .route_layer(middleware::from_fn(require_admin)),
        )
}
