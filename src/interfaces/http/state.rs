//! Shared router state

use std::sync::Arc;
use std::time::Instant;

use crate::application::{
    CertificateService, DashboardService, SessionService, StudentService, UserService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::JwtConfig;

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// Mark the cookie `Secure` (HTTPS only)
    pub secure: bool,
    /// Cookie lifetime in seconds
    pub max_age_secs: i64,
}

/// Everything handlers need, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub sessions: SessionService,
    pub users: UserService,
    pub students: StudentService,
    pub certificates: CertificateService,
    pub dashboard: DashboardService,
    pub cookies: CookieSettings,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt: JwtConfig, secure_cookies: bool) -> Self {
        let cookies = CookieSettings {
            secure: secure_cookies,
            max_age_secs: jwt.expiration_hours * 3600,
        };

        Self {
            sessions: SessionService::new(repos.clone(), jwt),
            users: UserService::new(repos.clone()),
            students: StudentService::new(repos.clone()),
            certificates: CertificateService::new(repos.clone()),
            dashboard: DashboardService::new(repos.clone()),
            repos,
            cookies,
            started_at: Instant::now(),
        }
    }
}
