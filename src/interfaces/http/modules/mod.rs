pub mod auth;
pub mod certificates;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod public;
pub mod students;
pub mod users;
