//! Application layer: business rules shared by every handler

pub mod identity;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use identity::{AccountChanges, LoginOutcome, NewAccount, SessionService, UserService};
pub use registry::{
    CertificateService, DashboardService, DashboardStats, StudentProfile, StudentService,
    VerifiedCertificate,
};
