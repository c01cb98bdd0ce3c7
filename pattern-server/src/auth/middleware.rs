//! Authentication middleware
//!
//! [`require_auth`] verifies the session token and injects [`CurrentUser`];
//! [`require_role`] is the single role gate layered on protected route
//! groups (no per-handler role checks anywhere else).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::models::UserRole;
use crate::security_log;
use crate::utils::AppError;

/// Authentication middleware - requires a verified session token
///
/// Reads the raw token from the `authorization` header (no `Bearer `
/// prefix in this API), validates it, and inserts [`CurrentUser`] into
/// request extensions.
///
/// # Errors
///
/// | Failure | Response |
/// |---------|----------|
/// | Missing header | 401 E3001 |
/// | Expired token | 401 E3003 |
/// | Invalid token | 401 E3002 |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header),
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::Unauthorized("Token not provided".to_string()));
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
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
            Err(e.into())
        }
    }
}

/// Role middleware - requires an exact role
///
/// Layered after [`require_auth`]. The match is exact: admin does not
/// implicitly satisfy customer-only routes.
///
/// # Usage
///
/// ```ignore
/// Router::new()
///     .route("/api/products", post(handler::create))
///     .route_layer(middleware::from_fn(require_role(UserRole::Admin)));
/// ```
pub fn require_role(
    role: UserRole,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            if !user.has_role(role) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id.clone(),
                    user_role = user.role.to_string(),
                    required_role = role.to_string()
                );
                return Err(AppError::forbidden("Unauthorized access"));
            }

            Ok(next.run(req).await)
        })
    }
}
