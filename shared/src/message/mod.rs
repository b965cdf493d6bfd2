//! 平台事件消息类型定义
//!
//! 这些类型在 mesa-server 内部总线和订阅端（SSE 流、测试）之间共享。
//! 消息以 JSON 序列化，便于直接透传给浏览器端。

use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// 新订单创建
    OrderCreated,
    /// 订单状态变更
    OrderStatusChanged,
    /// 菜单数据变更（分类/菜品/加料）
    MenuChanged,
    /// 优惠活动变更
    OfferChanged,
    /// 系统通知
    Notification,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::OrderCreated => write!(f, "order_created"),
            EventType::OrderStatusChanged => write!(f, "order_status_changed"),
            EventType::MenuChanged => write!(f, "menu_changed"),
            EventType::OfferChanged => write!(f, "offer_changed"),
            EventType::Notification => write!(f, "notification"),
        }
    }
}

/// 总线消息 - 只包含业务必需字段
///
/// `payload` 是已序列化的 JSON，订阅端按 `event` 选择反序列化目标。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusMessage {
    /// 消息追踪 ID
    pub request_id: Uuid,
    /// 事件类型
    pub event: EventType,
    /// 业务数据 (JSON)
    pub payload: serde_json::Value,
    /// 发出时间戳（毫秒）
    pub emitted_at: i64,
}

impl BusMessage {
    /// 创建新消息，payload 序列化失败时退化为 JSON null
    pub fn new<T: Serialize>(event: EventType, payload: &T) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event,
            payload: serde_json::to_value(payload).unwrap_or(serde_json::Value::Null),
            emitted_at: crate::util::now_millis(),
        }
    }

    /// 反序列化业务数据
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_message_roundtrip() {
        let payload = OrderCreatedPayload {
            order_id: 42,
            order_number: "MS-16".into(),
            branch_id: 7,
            user_id: 9,
            total: 25.5,
        };
        let msg = BusMessage::new(EventType::OrderCreated, &payload);
        let decoded: OrderCreatedPayload = msg.decode().unwrap();
        assert_eq!(decoded.order_id, 42);
        assert_eq!(decoded.order_number, "MS-16");
    }
}
