use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Certificate, CertificateDetails, CreateCertificateDto, DomainError, DomainResult,
    GetCertificateDto, RepositoryProvider, Student, UpdateCertificateDto,
};

/// Certificate with its owning student, guaranteed present.
#[derive(Debug, Clone)]
pub struct VerifiedCertificate {
    pub certificate: Certificate,
    pub student: Student,
}

#[derive(Clone)]
pub struct CertificateService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CertificateService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, filter: GetCertificateDto) -> DomainResult<Vec<CertificateDetails>> {
        self.repos.certificates().find_many(filter).await
    }

    pub async fn get(&self, id: &str) -> DomainResult<CertificateDetails> {
        self.repos
            .certificates()
            .find_details(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Certificate", id))
    }

    /// The student check and the insert are separate calls; a concurrent
    /// student delete in between is not prevented here.
    pub async fn create(&self, dto: CreateCertificateDto) -> DomainResult<Certificate> {
        self.ensure_student(&dto.student_id).await?;

        let certificate = self.repos.certificates().create(dto).await?;
        info!(
            certificate_id = %certificate.id,
            student_id = %certificate.student_id,
            status = %certificate.status,
            "Certificate created"
        );
        Ok(certificate)
    }

    pub async fn update(&self, id: &str, dto: UpdateCertificateDto) -> DomainResult<Certificate> {
        if self.repos.certificates().find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("Certificate", id));
        }
        if let Some(student_id) = dto.student_id.as_deref() {
            self.ensure_student(student_id).await?;
        }

        let certificate = self
            .repos
            .certificates()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Certificate", id))?;
        info!(certificate_id = %certificate.id, status = %certificate.status, "Certificate updated");
        Ok(certificate)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<Certificate> {
        let removed = self
            .repos
            .certificates()
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Certificate", id))?;
        info!(certificate_id = %removed.id, "Certificate deleted");
        Ok(removed)
    }

    /// Public lookup by id. A certificate whose student is gone is reported
    /// as not found.
    pub async fn verify(&self, id: &str) -> DomainResult<VerifiedCertificate> {
        let details = self.get(id).await?;
        let student = details
            .student
            .ok_or_else(|| DomainError::not_found("Student", &details.certificate.student_id))?;

        Ok(VerifiedCertificate {
            certificate: details.certificate,
            student,
        })
    }

    async fn ensure_student(&self, student_id: &str) -> DomainResult<()> {
        match self.repos.students().find_by_id(student_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Student", student_id)),
        }
    }
}
