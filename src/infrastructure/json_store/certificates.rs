use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::collection::JsonCollection;
use super::records::{CertificateRecord, StudentRecord};
use crate::domain::{
    Certificate, CertificateDetails, CertificateRepository, CreateCertificateDto, DomainResult,
    GetCertificateDto, StatusCounts, Student, UpdateCertificateDto,
};
use crate::shared::normalize_search;

pub struct JsonCertificateRepository {
    certificates: Arc<JsonCollection<CertificateRecord>>,
    students: Arc<JsonCollection<StudentRecord>>,
}

impl JsonCertificateRepository {
    pub fn new(
        certificates: Arc<JsonCollection<CertificateRecord>>,
        students: Arc<JsonCollection<StudentRecord>>,
    ) -> Self {
        Self {
            certificates,
            students,
        }
    }

    async fn students_by_id(&self) -> DomainResult<HashMap<String, Student>> {
        Ok(self
            .students
            .read_all()
            .await?
            .into_iter()
            .map(|s| (s.id.clone(), Student::from(s)))
            .collect())
    }
}

#[async_trait]
impl CertificateRepository for JsonCertificateRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Certificate>> {
        let certificates = self.certificates.read_all().await?;
        Ok(certificates
            .into_iter()
            .find(|c| c.id == id)
            .map(Certificate::from))
    }

    async fn find_details(&self, id: &str) -> DomainResult<Option<CertificateDetails>> {
        let Some(certificate) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let students = self.students.read_all().await?;
        let student = students
            .into_iter()
            .find(|s| s.id == certificate.student_id)
            .map(Student::from);
        Ok(Some(CertificateDetails {
            certificate,
            student,
        }))
    }

    async fn find_many(&self, dto: GetCertificateDto) -> DomainResult<Vec<CertificateDetails>> {
        let needle = normalize_search(dto.search.as_deref());
        let students = self.students_by_id().await?;

        let mut rows: Vec<CertificateDetails> = self
            .certificates
            .read_all()
            .await?
            .into_iter()
            .filter(|c| dto.status.map_or(true, |status| c.status == status))
            .filter(|c| {
                dto.student_id
                    .as_deref()
                    .map_or(true, |student_id| c.student_id == student_id)
            })
            .map(|c| {
                let student = students.get(&c.student_id).cloned();
                CertificateDetails {
                    certificate: c.into(),
                    student,
                }
            })
            .filter(|d| needle.as_deref().map_or(true, |n| d.matches_search(n)))
            .collect();

        rows.sort_by(|a, b| b.certificate.created_at.cmp(&a.certificate.created_at));
        Ok(rows)
    }

    async fn create(&self, dto: CreateCertificateDto) -> DomainResult<Certificate> {
        self.certificates
            .mutate(|certificates| {
                let now = Utc::now();
                let record = CertificateRecord {
                    id: Uuid::new_v4().to_string(),
                    title: dto.title,
                    description: dto.description,
                    student_id: dto.student_id,
                    issue_date: dto.issue_date.unwrap_or(now),
                    expiry_date: dto.expiry_date,
                    file_url: dto.file_url,
                    status: dto.status.unwrap_or_default(),
                    created_at: now,
                    updated_at: now,
                };
                certificates.push(record.clone());
                Ok(record.into())
            })
            .await
    }

    async fn update(
        &self,
        id: &str,
        dto: UpdateCertificateDto,
    ) -> DomainResult<Option<Certificate>> {
        self.certificates
            .mutate(|certificates| {
                let Some(record) = certificates.iter_mut().find(|c| c.id == id) else {
                    return Ok(None);
                };
                if let Some(title) = dto.title {
                    record.title = title;
                }
                if let Some(description) = dto.description {
                    record.description = description;
                }
                if let Some(student_id) = dto.student_id {
                    record.student_id = student_id;
                }
                if let Some(issue_date) = dto.issue_date {
                    record.issue_date = issue_date;
                }
                if let Some(expiry_date) = dto.expiry_date {
                    record.expiry_date = expiry_date;
                }
                if let Some(file_url) = dto.file_url {
                    record.file_url = file_url;
                }
                if let Some(status) = dto.status {
                    record.status = status;
                }
                record.updated_at = Utc::now();
                Ok(Some(record.clone().into()))
            })
            .await
    }

    async fn delete(&self, id: &str) -> DomainResult<Option<Certificate>> {
        self.certificates
            .mutate(|certificates| {
                let removed = certificates
                    .iter()
                    .position(|c| c.id == id)
                    .map(|index| certificates.remove(index));
                Ok(removed.map(Certificate::from))
            })
            .await
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.certificates.read_all().await?.len() as u64)
    }

    async fn count_by_student(&self, student_id: &str) -> DomainResult<u64> {
        let certificates = self.certificates.read_all().await?;
        Ok(certificates
            .iter()
            .filter(|c| c.student_id == student_id)
            .count() as u64)
    }

    async fn count_by_status(&self) -> DomainResult<StatusCounts> {
        let certificates = self.certificates.read_all().await?;
        Ok(certificates.iter().map(|c| c.status).collect())
    }
}
