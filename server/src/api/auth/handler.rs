//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use validator::Validate;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppJson, AppResult};
use shared::ApiResponse;
use shared::request::{LoginRequest, LoginResponse};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Verifies the configured admin credential and issues a capability token
/// with explicit expiry. Failures use a unified message to prevent
/// username probing.
pub async fn login(
    State(state): State<ServerState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    req.validate()?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let valid = state
        .config
        .admin
        .verify(&req.username, &req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

    if !valid {
        security_log!("WARN", "login_failed", username = req.username.clone());
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt
        .generate_admin_token(&req.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(username = %req.username, "Admin logged in successfully");

    Ok(Json(ApiResponse::ok(LoginResponse {
        token,
        expires_in: state.jwt.expires_in_seconds(),
    })))
}
