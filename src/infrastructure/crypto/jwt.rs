//! Session token handling

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::User;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "certhub-dev-secret-change-me".to_string(),
            expiration_hours: 24,
            issuer: "certhub".to_string(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Claims carried by a session token. Readable by anyone holding the token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// Display name
    pub name: String,
    /// "ADMIN" or "STAFF"
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub iss: String,
}

impl SessionClaims {
    pub fn for_user(user: &User, config: &JwtConfig, now: DateTime<Utc>) -> Self {
        let exp = now + Duration::hours(config.expiration_hours);
        Self {
            sub: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("invalid token signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// Create a session token for a user, issued now
pub fn create_token(user: &User, config: &JwtConfig) -> Result<String, TokenError> {
    create_token_at(user, config, Utc::now())
}

/// Create a session token with an explicit issuance time
pub fn create_token_at(
    user: &User,
    config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = SessionClaims::for_user(user, config, now);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify signature, issuer and expiry of a session token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}
