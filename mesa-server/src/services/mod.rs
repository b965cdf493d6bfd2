//! 服务层 - 跨请求的长生命周期服务
//!
//! - [`NotifyService`] - 进程内事件总线 (订单/菜单变更广播)
//! - [`MailService`] - 邮件中继客户端 (下单确认邮件)

pub mod bus;
pub mod mail;

pub use bus::NotifyService;
pub use mail::MailService;
