//! Admin gate: caller email from a header, checked against the allowlist.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::error::ApiError;
use super::server::AppState;

/// Header carrying the caller's email
pub const ADMIN_EMAIL_HEADER: &str = "x-user-email";

/// Verified admin email, inserted into request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminEmail(pub String);

/// Middleware for `/api/admin/*`.
///
/// Missing or blank header is 401; an email outside the allowlist is 403.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let email = req
        .headers()
        .get(ADMIN_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Unauthorized {
            reason: "Admin access requires authentication".to_owned(),
        })?;

    if !state.admins.contains(&email) {
        tracing::warn!(email = %email, "Admin access denied");
        return Err(ApiError::Forbidden {
            reason: "Admin access required".to_owned(),
        });
    }

    req.extensions_mut().insert(AdminEmail(email));
    Ok(next.run(req).await)
}
