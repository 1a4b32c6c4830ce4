//! User aggregate
//!
//! Staff and admin accounts, their DTOs, and the repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use model::{User, UserRole};

pub use dto_create::CreateUserDto;
pub use dto_update::UpdateUserDto;

pub use repository::UserRepository;
