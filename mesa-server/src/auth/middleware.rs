//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (健康检查等，让它们正常返回)
/// - 公开 API：注册/登录、浏览菜单、餐厅列表、菜品评价、进行中的优惠
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    if is_public_api_route(path, req.method()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    if state.blacklist.is_revoked(token) {
        security_log!("WARN", "auth_revoked", uri = format!("{:?}", req.uri()));
        return Err(AppError::new(ErrorCode::TokenRevoked));
    }

    // 验证令牌
    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 公开接口：无需令牌即可访问
fn is_public_api_route(path: &str, method: &http::Method) -> bool {
    if path == "/api/auth/login" || path == "/api/auth/register" {
        return true;
    }
    // 浏览类接口仅放行 GET；"/api/branches" 本身是管理端列表，不放行
    if method == http::Method::GET {
        return path.starts_with("/api/menu/")
            || path == "/api/restaurants"
            || path.starts_with("/api/restaurants/")
            || path.starts_with("/api/branches/")
            || path == "/api/offers/running"
            || path.starts_with("/api/reviews/item/");
    }
    false
}

/// 管理员权限中间件 - 叠加在 require_auth 之后
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;

    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            username = user.username.clone(),
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        let get = http::Method::GET;
        let post = http::Method::POST;
        assert!(is_public_api_route("/api/auth/login", &post));
        assert!(is_public_api_route("/api/auth/register", &post));
        assert!(is_public_api_route("/api/menu/branch/1", &get));
        assert!(is_public_api_route("/api/restaurants", &get));
        assert!(is_public_api_route("/api/branches/by-restaurant/1", &get));
        assert!(is_public_api_route("/api/offers/running", &get));
        assert!(is_public_api_route("/api/reviews/item/5", &get));
    }

    #[test]
    fn test_protected_routes() {
        let get = http::Method::GET;
        let post = http::Method::POST;
        assert!(!is_public_api_route("/api/orders", &post));
        assert!(!is_public_api_route("/api/orders", &get));
        assert!(!is_public_api_route("/api/branches", &get));
        assert!(!is_public_api_route("/api/loyalty/me", &get));
        // Browsing endpoints are public for reads only
        assert!(!is_public_api_route("/api/restaurants", &post));
    }
}
