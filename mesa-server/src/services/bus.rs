//! 事件总线服务
//!
//! 基于 `tokio::sync::broadcast` 的进程内总线。发布方（下单流程、
//! 状态机、菜单管理）在事务提交后广播 [`BusMessage`]；订阅方是
//! SSE 事件流接口和测试。无订阅者时消息直接丢弃。

use serde::Serialize;
use shared::message::{BusMessage, EventType};
use tokio::sync::broadcast;

/// 默认通道容量 — 慢订阅者滞后超过该值会丢失最旧的消息
const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct NotifyService {
    tx: broadcast::Sender<BusMessage>,
}

impl NotifyService {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// 发布事件（best effort — 无订阅者不算错误）
    pub fn publish<T: Serialize>(&self, event: EventType, payload: &T) {
        let message = BusMessage::new(event, payload);
        match self.tx.send(message) {
            Ok(subscribers) => {
                tracing::debug!(%event, subscribers, "Event published");
            }
            Err(_) => {
                tracing::debug!(%event, "Event dropped (no subscribers)");
            }
        }
    }

    /// 订阅总线
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.tx.subscribe()
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotifyService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::OrderCreatedPayload;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = NotifyService::new();
        let mut rx = bus.subscribe();

        bus.publish(
            EventType::OrderCreated,
            &OrderCreatedPayload {
                order_id: 1,
                order_number: "MS-1".into(),
                branch_id: 2,
                user_id: 3,
                total: 10.0,
            },
        );

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.event, EventType::OrderCreated);
        let payload: OrderCreatedPayload = msg.decode().unwrap();
        assert_eq!(payload.order_id, 1);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let bus = NotifyService::new();
        // Must not panic or error
        bus.publish(
            EventType::MenuChanged,
            &shared::message::MenuChangedPayload {
                branch_id: 1,
                entity: "menu_item".into(),
                entity_id: 9,
            },
        );
        assert_eq!(bus.subscriber_count(), 0);
    }
}
