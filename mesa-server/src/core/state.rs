use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, TokenBlacklist};
use crate::core::Config;
use crate::db::DbService;
use crate::services::{MailService, NotifyService};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是平台后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | blacklist | Arc<TokenBlacklist> | 登出令牌黑名单 |
/// | notify | NotifyService | 进程内事件总线 |
/// | mail | Arc<MailService> | 邮件中继客户端 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 登出令牌黑名单
    pub blacklist: Arc<TokenBlacklist>,
    /// 进程内事件总线
    pub notify: NotifyService,
    /// 邮件中继客户端
    pub mail: Arc<MailService>,
}

impl ServerState {
    /// 初始化服务器状态（连接数据库、跑迁移、装配服务）
    ///
    /// 数据库不可用属于致命错误，直接 panic 终止启动。
    pub async fn initialize(config: &Config) -> Self {
        if let Err(e) = std::fs::create_dir_all(&config.work_dir) {
            tracing::warn!(dir = %config.work_dir, error = %e, "Failed to create work dir");
        }

        let db = match DbService::new(&config.database_path).await {
            Ok(db) => db,
            Err(e) => panic!("Failed to initialize database: {e}"),
        };

        Self::with_db(config.clone(), db)
    }

    /// 用现成的数据库服务装配状态（集成测试入口）
    pub fn with_db(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let blacklist = Arc::new(TokenBlacklist::new());
        let notify = NotifyService::new();
        let mail = Arc::new(MailService::new(config.mail_relay_url.clone()));

        Self {
            config,
            db,
            jwt_service,
            blacklist,
            notify,
            mail,
        }
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
