//! Application configuration
//!
//! Loaded from a TOML file; every field has a default so a missing file or a
//! partial one both work. A handful of environment variables override the
//! file for container deployments.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::NewAccount;
use crate::domain::UserRole;
use crate::infrastructure::crypto::JwtConfig;
use crate::infrastructure::database::DatabaseConfig;

pub const ENV_CONFIG: &str = "CERTHUB_CONFIG";
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATA_DIR: &str = "CERTHUB_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// `<config_dir>/certhub/config.toml`, or `./config.toml` when the platform
/// has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("certhub").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
    /// Exported front-end served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Database,
    Json,
}

impl StorageBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" | "sqlite" | "postgres" => Some(Self::Database),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: String,
    pub data_dir: PathBuf,
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Database,
            database_url: "sqlite://./certhub.db?mode=rwc".to_string(),
            data_dir: PathBuf::from("./data"),
            max_connections: 10,
        }
    }
}

impl StorageConfig {
    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    /// Mark the session cookie `Secure`; enable behind HTTPS.
    pub secure_cookies: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            jwt_expiration_hours: jwt.expiration_hours,
            secure_cookies: false,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

impl SecurityConfig {
    pub fn jwt(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            expiration_hours: self.jwt_expiration_hours,
            ..JwtConfig::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAccount {
    pub username: String,
    pub password: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::Staff
}

impl From<&BootstrapAccount> for NewAccount {
    fn from(a: &BootstrapAccount) -> Self {
        NewAccount {
            username: a.username.clone(),
            password: a.password.clone(),
            name: a.name.clone(),
            role: a.role,
        }
    }
}

/// Accounts created on first start, when no user exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub enabled: bool,
    pub accounts: Vec<BootstrapAccount>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            accounts: vec![
                BootstrapAccount {
                    username: "admin".to_string(),
                    password: "admin123".to_string(),
                    name: "Administrator".to_string(),
                    role: UserRole::Admin,
                },
                BootstrapAccount {
                    username: "staff".to_string(),
                    password: "staff123".to_string(),
                    name: "Staff User".to_string(),
                    role: UserRole::Staff,
                },
            ],
        }
    }
}

impl BootstrapConfig {
    pub fn new_accounts(&self) -> Vec<NewAccount> {
        self.accounts.iter().map(NewAccount::from).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    /// Read `path`, falling back to defaults when the file does not exist,
    /// then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `lookup` abstracts the environment so tests don't mutate process state.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(secret) = set(ENV_JWT_SECRET) {
            self.security.jwt_secret = secret;
        }
        if let Some(url) = set(ENV_DATABASE_URL) {
            self.storage.database_url = url;
        }
        if let Some(dir) = set(ENV_DATA_DIR) {
            self.storage.data_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if !matches!(self.logging.format.to_ascii_lowercase().as_str(), "text" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be text or json, got {}",
                self.logging.format
            )));
        }
        if self.storage.backend == StorageBackend::Database
            && self.storage.database_url.trim().is_empty()
        {
            return Err(ConfigError::Invalid("storage.database_url is empty".into()));
        }
        if self.bootstrap.enabled
            && self
                .bootstrap
                .accounts
                .iter()
                .any(|a| a.username.trim().is_empty() || a.password.is_empty())
        {
            return Err(ConfigError::Invalid(
                "bootstrap accounts need a username and a password".into(),
            ));
        }
        Ok(())
    }
}
