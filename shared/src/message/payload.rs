use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::OrderStatus;

// ==================== Notification Level ====================

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// 普通信息
    Info,
    /// 警告
    Warning,
    /// 错误
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

// ==================== Payloads ====================

/// 新订单载荷 (下单事务提交后广播)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreatedPayload {
    pub order_id: i64,
    pub order_number: String,
    pub branch_id: i64,
    pub user_id: i64,
    pub total: f64,
}

/// 订单状态变更载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusChangedPayload {
    pub order_id: i64,
    pub order_number: String,
    pub from: Option<OrderStatus>,
    pub to: OrderStatus,
}

/// 菜单变更载荷 — 管理端修改分类/菜品/加料后广播，
/// 客户端据此刷新本地菜单缓存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuChangedPayload {
    pub branch_id: i64,
    /// 变更的资源类型: "category" | "menu_item" | "add_on"
    pub entity: String,
    pub entity_id: i64,
}

/// 优惠活动变更载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferChangedPayload {
    pub offer_id: i64,
    pub code: String,
    pub is_active: bool,
}

/// 通知载荷 (服务端 -> 订阅端)
///
/// 用于向管理端展示系统状态、错误或业务提示。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// 标题
    pub title: String,
    /// 消息内容
    pub message: String,
    /// 通知级别
    pub level: NotificationLevel,
    /// 附加数据 (JSON)
    pub data: Option<serde_json::Value>,
}
