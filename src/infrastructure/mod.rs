//! Infrastructure layer: credentials and the two storage backends

pub mod crypto;
pub mod database;
pub mod json_store;

pub use database::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};
pub use json_store::JsonRepositoryProvider;
