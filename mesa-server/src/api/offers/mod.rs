//! Offer API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/offers", offer_routes())
}

fn offer_routes() -> Router<ServerState> {
    Router::new()
        .route("/running", get(handler::list_running))
        .merge(
            Router::new()
                .route("/", post(handler::create).get(handler::list_admin))
                .route(
                    "/{id}",
                    get(handler::get_by_id)
                        .put(handler::update)
                        .delete(handler::delete),
                )
                .route_layer(middleware::from_fn(require_admin)),
        )
}
