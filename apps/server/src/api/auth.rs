use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use markethub_core::users::{NewUser, User};

use crate::auth::AuthUser;
use crate::error::{ok, ApiError, ApiResult, Envelope};
use crate::main_lib::AppState;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

const MIN_PASSWORD_LEN: usize = 8;

async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<Envelope<AuthResponse>>> {
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let password_hash = state.auth.hash_password(&req.password)?;
    let user = state
        .user_service
        .create_user(NewUser {
            username: req.username.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash,
        })
        .await?;

    let token = state.auth.issue_token(&user.id, &user.username)?;
    Ok(ok(AuthResponse { token, user }))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Envelope<AuthResponse>>> {
    // Unknown user and wrong password answer identically.
    let denied = || ApiError::Unauthorized("invalid credentials".to_string());

    let user = state
        .user_service
        .get_by_username(req.username.trim())
        .map_err(|_| denied())?;

    if !state.auth.verify_password(&req.password, &user.password_hash) {
        return Err(denied());
    }

    let token = state.auth.issue_token(&user.id, &user.username)?;
    Ok(ok(AuthResponse { token, user }))
}

async fn me(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.user_service.get_user(&caller.user_id)?;
    Ok(ok(user))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
}
