//! Database entities module

pub mod certificate;
pub mod student;
pub mod user;

pub use certificate::Entity as Certificate;
pub use student::Entity as Student;
pub use user::Entity as User;
