//! 管理端事件流 (SSE)
//!
//! 订阅进程内总线并以 Server-Sent Events 推给管理端。
//! 订阅者消费过慢会丢失最旧的消息（broadcast 语义），
//! 管理端以事件为刷新信号而非数据源，丢失无害。

use std::convert::Infallible;

use axum::{
    Router, middleware,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::stream::Stream;
use tokio::sync::broadcast;

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/events",
        get(events).route_layer(middleware::from_fn(require_admin)),
    )
}

/// GET /api/events - 事件流
async fn events(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.notify.subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(msg) => {
                    let name = msg.event.to_string();
                    match Event::default().event(name).json_data(&msg) {
                        Ok(event) => return Some((Ok::<_, Infallible>(event), rx)),
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to serialize SSE event");
                            continue;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "SSE subscriber lagged, events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
