//! Auth middleware
//!
//! Validates the admin capability token on privileged routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentAdmin, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Admin auth middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>` and
/// injects [`CurrentAdmin`] into request extensions. Only `/api/admin/`
/// paths are enforced; everything else passes through (CORS preflights
/// included).
///
/// | Failure | Status |
/// |---------|--------|
/// | No Authorization header | 401 |
/// | Expired token | 401 |
/// | Invalid token | 401 |
/// | Non-admin role | 403 |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !req.uri().path().starts_with("/api/admin/") {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) if claims.role == "admin" => {
            req.extensions_mut().insert(CurrentAdmin::from(claims));
            Ok(next.run(req).await)
        }
        Ok(claims) => {
            security_log!(
                "WARN",
                "admin_required",
                subject = claims.sub,
                role = claims.role
            );
            Err(AppError::forbidden("Admin role required"))
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}
