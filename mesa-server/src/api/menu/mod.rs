//! 门店菜单聚合接口

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu/branch/{branch_id}", get(handler::branch_menu))
}
