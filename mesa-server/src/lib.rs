//! Mesa Server - 多餐厅在线点餐平台后端
//!
//! # 架构概述
//!
//! 本 crate 是平台的 HTTP 后端，提供以下核心功能：
//!
//! - **下单与计价** (`orders`): 单事务下单流程、优惠券校验、状态机
//! - **数据库** (`db`): SQLite 连接池与 repository 层
//! - **认证** (`auth`): JWT + Argon2 认证体系、登出黑名单
//! - **积分** (`loyalty`): 等级与积分计算
//! - **HTTP API** (`api`): RESTful API 接口
//! - **服务** (`services`): 进程内事件总线、邮件中继
//!
//! # 模块结构
//!
//! ```text
//! mesa-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── auth/          # JWT 认证、黑名单、中间件
//! ├── db/            # 数据库层 (sqlx/SQLite)
//! ├── orders/        # 下单、计价、优惠券、状态机
//! ├── loyalty/       # 积分等级
//! ├── services/      # 事件总线、邮件
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、校验、日志、时间
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod loyalty;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, TokenBlacklist};
pub use core::{Config, Server, ServerState, setup_environment};
pub use services::{MailService, NotifyService};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  _________ _
  / /|_/ / _ \/ ___/ __ `/
 / /  / /  __(__  ) /_/ /
/_/  /_/\___/____/\__,_/
    "#
    );
}
