//! Auth API Handlers

use axum::{Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, JwtService, password};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{PasswordChange, User, UserPublic, UserRegister, UserRole, UserUpdate};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/auth/register - 顾客注册
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<UserRegister>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&req.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.full_name, "full_name", MAX_NAME_LEN)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_password(&req.password)?;
    if !req.email.contains('@') {
        return Err(AppError::validation("email is not valid"));
    }

    let pool = state.pool();
    if user_repo::find_by_username(pool, &req.username).await?.is_some() {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }
    if user_repo::find_by_email(pool, &req.email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailExists));
    }

    let hash = password::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let user = user_repo::create(
        pool,
        &req.username,
        &req.email,
        &hash,
        &req.full_name,
        req.phone,
        UserRole::Customer,
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    issue(&state, user)
}

/// POST /api/auth/login - 登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let pool = state.pool();

    // 统一的失败错误，避免暴露用户名是否存在
    let user = user_repo::find_by_username(pool, &req.username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let ok = password::verify_password(&req.password, &user.password_hash)
        .map_err(|_| AppError::invalid_credentials())?;
    if !ok {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    }
    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    security_log!("INFO", "login_ok", username = user.username.clone());

    issue(&state, user)
}

/// POST /api/auth/logout - 登出（令牌进黑名单直至自然过期）
pub async fn logout(State(state): State<ServerState>, headers: HeaderMap) -> AppResult<Json<()>> {
    let token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
        .ok_or_else(AppError::unauthorized)?;

    let claims = state
        .jwt_service
        .validate_token(token)
        .map_err(|_| AppError::invalid_token("Invalid token"))?;

    state.blacklist.revoke(token, claims.exp * 1000);
    security_log!("INFO", "logout", username = claims.username.clone());

    Ok(Json(()))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserPublic>> {
    let row = user_repo::find_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(row.into()))
}

/// PUT /api/auth/profile - 更新资料
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<UserUpdate>,
) -> AppResult<Json<UserPublic>> {
    validate_optional_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&req.full_name, "full_name", MAX_NAME_LEN)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let pool = state.pool();
    if let Some(ref email) = req.email {
        if !email.contains('@') {
            return Err(AppError::validation("email is not valid"));
        }
        if let Some(existing) = user_repo::find_by_email(pool, email).await?
            && existing.id != user.id
        {
            return Err(AppError::new(ErrorCode::EmailExists));
        }
    }

    let updated = user_repo::update_profile(pool, user.id, req).await?;
    Ok(Json(updated.into()))
}

/// PUT /api/auth/password - 修改密码（需验证旧密码）
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<PasswordChange>,
) -> AppResult<Json<()>> {
    validate_password(&req.new_password)?;

    let pool = state.pool();
    let row = user_repo::find_by_id(pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let ok = password::verify_password(&req.current_password, &row.password_hash)
        .map_err(|_| AppError::invalid_credentials())?;
    if !ok {
        return Err(AppError::invalid_credentials());
    }

    let hash = password::hash_password(&req.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    user_repo::update_password(pool, user.id, &hash).await?;

    security_log!("INFO", "password_changed", username = user.username.clone());
    Ok(Json(()))
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("password is too long"));
    }
    Ok(())
}

fn issue(state: &ServerState, user: User) -> AppResult<Json<AuthResponse>> {
    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
