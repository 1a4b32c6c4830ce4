//! Users module: account management (admin CRUD)

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
