use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims carried by every issued credential.
///
/// `permissions` is optional on the wire; a token without it authenticates a
/// principal that can pass no guard check.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(principal: String, permissions: Vec<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: principal,
            permissions,
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    MissingSecret,
    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Sign claims into a compact JWT with the server-held secret.
pub fn mint(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }
    let token = encode(&Header::default(), claims, &EncodingKey::from_secret(secret))?;
    Ok(token)
}

/// Verify and decode a JWT. Any failure (bad signature, malformed payload,
/// expiry) yields `None`; nothing propagates past this boundary.
pub fn verify(token: &str, secret: &[u8]) -> Option<Claims> {
    if secret.is_empty() {
        return None;
    }
    let key = DecodingKey::from_secret(secret);
    match decode::<Claims>(token, &key, &Validation::default()) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            tracing::debug!("token verification failed: {}", e);
            None
        }
    }
}

/// Extract the raw token from an `Authorization` header value.
///
/// The value must be exactly two whitespace-separated parts, the first being
/// the literal `Bearer`.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}
