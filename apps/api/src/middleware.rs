use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use portal_core::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the bearer token into an admin identity request extension.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(request.headers())
        .map(str::to_owned)
        .ok_or_else(|| AppError::Unauthorized("No token provided".to_owned()))?;

    let identity = state
        .admin_auth_service
        .authenticate_bearer(token.as_str())
        .await?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
