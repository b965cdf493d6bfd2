//! 后台任务管理
//!
//! 统一管理后台任务的注册、启动和关闭。任务 panic 被捕获并记录，
//! 不影响其它任务。

use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use shared::message::{EventType, NotificationLevel, NotificationPayload};

use crate::core::ServerState;
use crate::db::repository::offer;

/// 黑名单清理间隔
const BLACKLIST_SWEEP_INTERVAL: Duration = Duration::from_secs(60);
/// 过期优惠下线间隔
const OFFER_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// 长期后台工作者
    Worker,
    /// 定时任务
    Periodic,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Worker => write!(f, "Worker"),
            TaskKind::Periodic => write!(f, "Periodic"),
        }
    }
}

/// 已注册的后台任务
struct RegisteredTask {
    name: &'static str,
    kind: TaskKind,
    handle: JoinHandle<()>,
}

/// 后台任务管理器
pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// 全局取消令牌（传给任务做优雅退出）
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 注册并启动一个后台任务
    pub fn spawn<F>(&mut self, name: &'static str, kind: TaskKind, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            if let Err(panic) = AssertUnwindSafe(future).catch_unwind().await {
                tracing::error!(task = name, ?panic, "Background task panicked");
            }
        });
        tracing::debug!(task = name, kind = %kind, "Background task started");
        self.tasks.push(RegisteredTask { name, kind, handle });
    }

    /// 优雅关闭：发取消信号后终止仍在运行的任务
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for task in self.tasks {
            task.handle.abort();
            tracing::debug!(task = task.name, "Background task stopped");
        }
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

/// 启动平台的标准后台任务集
pub fn start_background_tasks(state: &ServerState) -> BackgroundTasks {
    let mut tasks = BackgroundTasks::new();
    let shutdown = tasks.shutdown_token();

    // 1. 黑名单清理：丢弃已自然过期的登出令牌
    {
        let state = state.clone();
        let shutdown = shutdown.clone();
        tasks.spawn("blacklist_sweep", TaskKind::Periodic, async move {
            let mut interval = tokio::time::interval(BLACKLIST_SWEEP_INTERVAL);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = interval.tick() => {
                        let removed = state.blacklist.sweep();
                        if removed > 0 {
                            tracing::debug!(removed, "Blacklist sweep");
                        }
                    }
                }
            }
        });
    }

    // 2. 过期优惠下线：窗口结束的优惠自动失效
    {
        let state = state.clone();
        let shutdown = shutdown.clone();
        tasks.spawn("offer_expiry_sweep", TaskKind::Periodic, async move {
            let mut interval = tokio::time::interval(OFFER_SWEEP_INTERVAL);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = interval.tick() => {
                        let now = shared::util::now_millis();
                        match offer::deactivate_expired(state.pool(), now).await {
                            Ok(0) => {}
                            Ok(count) => {
                                tracing::info!(count, "Expired offers deactivated");
                                state.notify.publish(
                                    EventType::Notification,
                                    &NotificationPayload {
                                        title: "Offers expired".into(),
                                        message: format!("{count} offers reached their end date"),
                                        level: NotificationLevel::Info,
                                        data: Some(serde_json::json!({ "count": count })),
                                    },
                                );
                            }
                            Err(e) => tracing::error!(error = %e, "Offer expiry sweep failed"),
                        }
                    }
                }
            }
        });
    }

    tasks
}
