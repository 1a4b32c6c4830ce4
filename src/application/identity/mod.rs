//! Identity module: sessions and account management
//!
//! `SessionService` turns credentials into tokens and tokens back into
//! users. `UserService` holds the admin-facing account rules.

pub mod service;
pub mod session;

pub use service::{AccountChanges, NewAccount, UserService};
pub use session::{LoginOutcome, SessionService};
