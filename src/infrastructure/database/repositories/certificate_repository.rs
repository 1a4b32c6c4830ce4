use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::student_repository::to_domain as student_to_domain;
use super::{db_err, lower_contains, sql_can_match};
use crate::domain::{
    Certificate, CertificateDetails, CertificateRepository, CertificateStatus,
    CreateCertificateDto, DomainResult, GetCertificateDto, StatusCounts, UpdateCertificateDto,
};
use crate::infrastructure::database::entities::{certificate, student};
use crate::shared::normalize_search;

pub struct SeaOrmCertificateRepository {
    db: DatabaseConnection,
}

impl SeaOrmCertificateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &str) -> DomainResult<Option<certificate::Model>> {
        certificate::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(status: certificate::CertificateStatus) -> CertificateStatus {
    match status {
        certificate::CertificateStatus::Pending => CertificateStatus::Pending,
        certificate::CertificateStatus::Issued => CertificateStatus::Issued,
        certificate::CertificateStatus::Revoked => CertificateStatus::Revoked,
        certificate::CertificateStatus::Expired => CertificateStatus::Expired,
    }
}

fn status_to_entity(status: CertificateStatus) -> certificate::CertificateStatus {
    match status {
        CertificateStatus::Pending => certificate::CertificateStatus::Pending,
        CertificateStatus::Issued => certificate::CertificateStatus::Issued,
        CertificateStatus::Revoked => certificate::CertificateStatus::Revoked,
        CertificateStatus::Expired => certificate::CertificateStatus::Expired,
    }
}

fn to_domain(model: certificate::Model) -> Certificate {
    Certificate {
        id: model.id,
        title: model.title,
        description: model.description,
        student_id: model.student_id,
        issue_date: model.issue_date,
        expiry_date: model.expiry_date,
        file_url: model.file_url,
        status: status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn to_details((cert, student): (certificate::Model, Option<student::Model>)) -> CertificateDetails {
    CertificateDetails {
        certificate: to_domain(cert),
        student: student.map(student_to_domain),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl CertificateRepository for SeaOrmCertificateRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Certificate>> {
        Ok(self.find_model(id).await?.map(to_domain))
    }

    async fn find_details(&self, id: &str) -> DomainResult<Option<CertificateDetails>> {
        let row = certificate::Entity::find_by_id(id)
            .find_also_related(student::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(to_details))
    }

    async fn find_many(&self, dto: GetCertificateDto) -> DomainResult<Vec<CertificateDetails>> {
        let mut query = certificate::Entity::find().find_also_related(student::Entity);

        if let Some(status) = dto.status {
            query = query.filter(certificate::Column::Status.eq(status_to_entity(status)));
        }
        if let Some(student_id) = dto.student_id {
            query = query.filter(certificate::Column::StudentId.eq(student_id));
        }
        let needle = normalize_search(dto.search.as_deref());
        if let Some(needle) = needle.as_deref().filter(|n| sql_can_match(n)) {
            query = query.filter(
                Condition::any()
                    .add(lower_contains(
                        (certificate::Entity, certificate::Column::Title),
                        needle,
                    ))
                    .add(lower_contains(
                        (certificate::Entity, certificate::Column::Description),
                        needle,
                    ))
                    .add(lower_contains((student::Entity, student::Column::Name), needle))
                    .add(lower_contains((student::Entity, student::Column::Nim), needle)),
            );
        }

        let rows = query
            .order_by_desc(certificate::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let mut details: Vec<CertificateDetails> = rows.into_iter().map(to_details).collect();
        if let Some(needle) = needle.as_deref().filter(|n| !sql_can_match(n)) {
            details.retain(|d| d.matches_search(needle));
        }
        Ok(details)
    }

    async fn create(&self, dto: CreateCertificateDto) -> DomainResult<Certificate> {
        let now = Utc::now();
        let model = certificate::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(dto.title),
            description: Set(dto.description),
            student_id: Set(dto.student_id),
            issue_date: Set(dto.issue_date.unwrap_or(now)),
            expiry_date: Set(dto.expiry_date),
            file_url: Set(dto.file_url),
            status: Set(status_to_entity(dto.status.unwrap_or_default())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(to_domain(inserted))
    }

    async fn update(
        &self,
        id: &str,
        dto: UpdateCertificateDto,
    ) -> DomainResult<Option<Certificate>> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: certificate::ActiveModel = existing.into();
        if let Some(title) = dto.title {
            active.title = Set(title);
        }
        if let Some(description) = dto.description {
            active.description = Set(description);
        }
        if let Some(student_id) = dto.student_id {
            active.student_id = Set(student_id);
        }
        if let Some(issue_date) = dto.issue_date {
            active.issue_date = Set(issue_date);
        }
        if let Some(expiry_date) = dto.expiry_date {
            active.expiry_date = Set(expiry_date);
        }
        if let Some(file_url) = dto.file_url {
            active.file_url = Set(file_url);
        }
        if let Some(status) = dto.status {
            active.status = Set(status_to_entity(status));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(to_domain(updated)))
    }

    async fn delete(&self, id: &str) -> DomainResult<Option<Certificate>> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        existing.clone().delete(&self.db).await.map_err(db_err)?;
        Ok(Some(to_domain(existing)))
    }

    async fn count(&self) -> DomainResult<u64> {
        certificate::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_by_student(&self, student_id: &str) -> DomainResult<u64> {
        certificate::Entity::find()
            .filter(certificate::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_by_status(&self) -> DomainResult<StatusCounts> {
        let mut counts = StatusCounts::default();
        for status in CertificateStatus::ALL {
            let n = certificate::Entity::find()
                .filter(certificate::Column::Status.eq(status_to_entity(status)))
                .count(&self.db)
                .await
                .map_err(db_err)?;
            counts.set(status, n);
        }
        Ok(counts)
    }
}
