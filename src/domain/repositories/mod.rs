//! Repository provider for the domain layer
//!
//! Handlers and services depend on `dyn RepositoryProvider` only; the
//! concrete backend (relational or flat-file) is picked at startup.

use async_trait::async_trait;

use super::certificate::CertificateRepository;
use super::student::StudentRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let student = repos.students().find_by_nim("12345678").await?;
///     let certs = repos.certificates().count_by_student(&student.id).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn students(&self) -> &dyn StudentRepository;
    fn certificates(&self) -> &dyn CertificateRepository;

    /// Short backend name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// Cheap round-trip to the backing store.
    async fn ping(&self) -> DomainResult<()>;
}
