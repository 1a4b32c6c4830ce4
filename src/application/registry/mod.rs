//! Student and certificate registry

pub mod certificates;
pub mod dashboard;
pub mod students;

pub use certificates::{CertificateService, VerifiedCertificate};
pub use dashboard::{DashboardService, DashboardStats};
pub use students::{StudentProfile, StudentService};
