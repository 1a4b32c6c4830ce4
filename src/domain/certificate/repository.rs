//! Certificate repository interface

use async_trait::async_trait;

use super::{
    Certificate, CertificateDetails, CreateCertificateDto, GetCertificateDto, StatusCounts,
    UpdateCertificateDto,
};
use crate::domain::DomainResult;

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Certificate>>;
    /// Certificate joined with its student.
    async fn find_details(&self, id: &str) -> DomainResult<Option<CertificateDetails>>;
    /// Newest first.
    async fn find_many(&self, dto: GetCertificateDto) -> DomainResult<Vec<CertificateDetails>>;

    async fn create(&self, dto: CreateCertificateDto) -> DomainResult<Certificate>;
    async fn update(
        &self,
        id: &str,
        dto: UpdateCertificateDto,
    ) -> DomainResult<Option<Certificate>>;
    async fn delete(&self, id: &str) -> DomainResult<Option<Certificate>>;

    async fn count(&self) -> DomainResult<u64>;
    async fn count_by_student(&self, student_id: &str) -> DomainResult<u64>;
    async fn count_by_status(&self) -> DomainResult<StatusCounts>;
}
