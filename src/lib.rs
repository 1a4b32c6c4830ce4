//! # CertHub
//!
//! Student certificate registry: staff manage students and the certificates
//! awarded to them, and anyone can verify a certificate by its id.
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository traits
//! - **application**: services holding the business rules
//! - **infrastructure**: credentials plus two interchangeable storage
//!   backends (SeaORM database, JSON files)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, validation helpers, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, StorageBackend};
pub use infrastructure::{
    init_database, DatabaseConfig, JsonRepositoryProvider, SeaOrmRepositoryProvider,
};
pub use interfaces::http::{build_router, AppState};
