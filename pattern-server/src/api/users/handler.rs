//! Account Handlers

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserByIdRequest};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{UserCreate, UserRole, thing_to_string};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// Register a new customer account
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(UserCreate {
            name: req.name,
            email: req.email,
            password: req.password,
            phone_number: req.phone_number,
            role: UserRole::Customer,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ok_with_message(user.to_info(), "User registered"),
    ))
}

/// Log in and receive a session token.
///
/// An unknown email is a 404; a known email with the wrong password is
/// a 401.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let verified = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        security_log!("WARN", "login_failed", email = req.email.clone());
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let user_id = user
        .id
        .as_ref()
        .map(thing_to_string)
        .ok_or_else(|| AppError::internal("User record is missing its id"))?;
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.email, &user.role)?;

    security_log!("INFO", "login_ok", user_id = user_id.clone());
    Ok(ok(LoginResponse {
        token,
        user: user.to_info(),
    }))
}

/// List all accounts, sanitized (admin)
pub async fn list_users(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all().await?;
    let infos: Vec<_> = users.iter().map(|u| u.to_info()).collect();
    Ok(ok(infos))
}

/// Look up one account by id (customer)
pub async fn user_detail(
    State(state): State<ServerState>,
    Json(req): Json<UserByIdRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = req
        .user_id
        .ok_or_else(|| AppError::validation("user_id is required"))?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(ok(user.to_info()))
}
