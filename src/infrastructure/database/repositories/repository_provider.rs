//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::domain::certificate::CertificateRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::student::StudentRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainResult;

use super::certificate_repository::SeaOrmCertificateRepository;
use super::db_err;
use super::student_repository::SeaOrmStudentRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let student = repos.students().find_by_nim("12345678").await?;
/// let owned = repos.certificates().count_by_student(&student.id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    users: SeaOrmUserRepository,
    students: SeaOrmStudentRepository,
    certificates: SeaOrmCertificateRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            students: SeaOrmStudentRepository::new(db.clone()),
            certificates: SeaOrmCertificateRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn students(&self) -> &dyn StudentRepository {
        &self.students
    }

    fn certificates(&self) -> &dyn CertificateRepository {
        &self.certificates
    }

    fn backend_name(&self) -> &'static str {
        "database"
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db.ping().await.map_err(db_err)
    }
}
