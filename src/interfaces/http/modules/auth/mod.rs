//! Auth module: login, logout and the current session

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
