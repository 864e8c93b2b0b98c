use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::context::{establish, AuthContext};
use crate::auth::token;
use crate::config;
use crate::error::ApiError;

/// Entry middleware: decode the bearer credential, reject before any handler
/// runs on failure, otherwise execute the rest of the request inside the
/// established ambient context. Purely gating; fails closed, no retries.
pub async fn auth_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

    let raw = token::bearer_token(header_value)
        .ok_or_else(|| ApiError::unauthorized("Authorization header must be 'Bearer <token>'"))?;

    let secret = config::config().security.jwt_secret.as_bytes();
    let claims = token::verify(raw, secret)
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    let ctx = AuthContext::from(claims);
    tracing::debug!(principal = %ctx.principal, "request authenticated");

    Ok(establish(ctx, next.run(request)).await)
}
