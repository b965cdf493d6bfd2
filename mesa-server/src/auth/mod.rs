//! 认证授权模块
//!
//! 提供 JWT 认证、登出黑名单和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`TokenBlacklist`] - 登出令牌黑名单
//! - [`require_auth`] / [`require_admin`] - 认证/授权中间件

pub mod blacklist;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use blacklist::TokenBlacklist;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
