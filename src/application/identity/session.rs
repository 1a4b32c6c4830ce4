//! Login and per-request session resolution

use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::domain::{DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::{
    create_token, hash_password, verify_password, verify_token, JwtConfig,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Digest checked when the username is unknown, so both failure paths pay
/// for one bcrypt verification.
fn decoy_hash() -> Option<&'static str> {
    static DECOY: OnceLock<Option<String>> = OnceLock::new();
    DECOY
        .get_or_init(|| hash_password("certhub-decoy-password").ok())
        .as_deref()
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: User,
}

#[derive(Clone)]
pub struct SessionService {
    repos: Arc<dyn RepositoryProvider>,
    jwt: JwtConfig,
}

impl SessionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt: JwtConfig) -> Self {
        Self { repos, jwt }
    }

    /// Check credentials and mint a session token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginOutcome> {
        let Some(user) = self.repos.users().find_by_username(username).await? else {
            if let Some(decoy) = decoy_hash() {
                verify_password(password, decoy);
            }
            debug!(username, "Login for unknown user");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !verify_password(password, &user.password_hash) {
            debug!(username, "Login with wrong password");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = create_token(&user, &self.jwt)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(LoginOutcome {
            token,
            expires_in: self.jwt.expiration_hours * 3600,
            user,
        })
    }

    /// Resolve a session token to the current user record.
    ///
    /// The user is always re-read from storage so deletions and role
    /// changes apply immediately. Every failure collapses to `None`.
    pub async fn resolve_user(&self, token: &str) -> Option<User> {
        let claims = match verify_token(token, &self.jwt) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                return None;
            }
        };

        match self.repos.users().find_by_id(&claims.sub).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                debug!(user_id = %claims.sub, "Session token for missing user");
                None
            }
            Err(e) => {
                warn!(user_id = %claims.sub, error = %e, "User lookup failed during session check");
                None
            }
        }
    }
}
