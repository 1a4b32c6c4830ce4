//! Flat-file storage backend
//!
//! Three JSON arrays under one data directory: `users.json`,
//! `students.json` and `certificates.json`.

pub mod collection;
pub mod records;

mod certificates;
mod students;
mod users;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::certificate::CertificateRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::student::StudentRepository;
use crate::domain::user::UserRepository;
use crate::shared::errors::{DomainResult, InfraError};

pub use certificates::JsonCertificateRepository;
pub use collection::JsonCollection;
pub use students::JsonStudentRepository;
pub use users::JsonUserRepository;

pub const USERS_FILE: &str = "users.json";
pub const STUDENTS_FILE: &str = "students.json";
pub const CERTIFICATES_FILE: &str = "certificates.json";

/// Repository provider backed by JSON documents on disk.
pub struct JsonRepositoryProvider {
    data_dir: PathBuf,
    users: JsonUserRepository,
    students: JsonStudentRepository,
    certificates: JsonCertificateRepository,
}

impl JsonRepositoryProvider {
    /// Open (and create if needed) a data directory.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, InfraError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir).await?;

        let users = Arc::new(JsonCollection::new(data_dir.join(USERS_FILE)));
        let students = Arc::new(JsonCollection::new(data_dir.join(STUDENTS_FILE)));
        let certificates = Arc::new(JsonCollection::new(data_dir.join(CERTIFICATES_FILE)));

        info!(data_dir = %data_dir.display(), "Opened JSON data store");

        Ok(Self {
            users: JsonUserRepository::new(users),
            students: JsonStudentRepository::new(students.clone()),
            certificates: JsonCertificateRepository::new(certificates, students),
            data_dir,
        })
    }
}

#[async_trait]
impl RepositoryProvider for JsonRepositoryProvider {
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
        "json"
    }

    async fn ping(&self) -> DomainResult<()> {
        let meta = tokio::fs::metadata(&self.data_dir)
            .await
            .map_err(InfraError::from)?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(InfraError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "data directory is not a directory",
            ))
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CertificateStatus, CreateCertificateDto, CreateStudentDto, CreateUserDto, DomainError,
        GetCertificateDto, GetStudentDto, UpdateCertificateDto, UpdateStudentDto, UserRole,
    };

    fn student(nim: &str, name: &str) -> CreateStudentDto {
        CreateStudentDto {
            nim: nim.into(),
            name: name.into(),
            email: "s@example.com".into(),
            phone: None,
            address: None,
            date_of_birth: None,
            year: None,
            major: "Teknik Informatika".into(),
            enrollment_date: None,
        }
    }

    fn cert(title: &str, student_id: &str) -> CreateCertificateDto {
        CreateCertificateDto {
            title: title.into(),
            description: Some("Kompetisi tingkat nasional".into()),
            student_id: student_id.into(),
            issue_date: None,
            expiry_date: None,
            file_url: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn writes_camel_case_documents() {
        let dir = tempfile::tempdir().unwrap();
        let repos = JsonRepositoryProvider::open(dir.path()).await.unwrap();

        let s = repos.students().create(student("111", "Budi")).await.unwrap();
        repos.certificates().create(cert("Juara", &s.id)).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join(CERTIFICATES_FILE)).unwrap();
        assert!(raw.contains("\"studentId\""));
        assert!(raw.contains("\"PENDING\""));
    }

    #[tokio::test]
    async fn duplicate_nim_and_username_are_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let repos = JsonRepositoryProvider::open(dir.path()).await.unwrap();

        let first = repos.students().create(student("111", "Budi")).await.unwrap();
        let err = repos
            .students()
            .create(student("111", "Siti"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Keeping your own NIM is fine; taking someone else's is not.
        repos
            .students()
            .update(
                &first.id,
                UpdateStudentDto {
                    nim: Some("111".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let other = repos.students().create(student("222", "Siti")).await.unwrap();
        let err = repos
            .students()
            .update(
                &other.id,
                UpdateStudentDto {
                    nim: Some("111".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let user = CreateUserDto {
            username: "staff".into(),
            password_hash: "$2b$10$x".into(),
            name: "Staff User".into(),
            role: UserRole::Staff,
        };
        repos.users().create(user.clone()).await.unwrap();
        assert!(matches!(
            repos.users().create(user).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn student_search_and_ordering() {
        let dir = tempfile::tempdir().unwrap();
        let repos = JsonRepositoryProvider::open(dir.path()).await.unwrap();
        repos.students().create(student("2", "Siti")).await.unwrap();
        repos.students().create(student("1", "Budi")).await.unwrap();

        let all = repos
            .students()
            .find_many(GetStudentDto::default())
            .await
            .unwrap();
        assert_eq!(all[0].name, "Budi");

        let hits = repos
            .students()
            .find_many(GetStudentDto {
                search: Some("sItI".into()),
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn certificate_queries_join_students() {
        let dir = tempfile::tempdir().unwrap();
        let repos = JsonRepositoryProvider::open(dir.path()).await.unwrap();
        let budi = repos.students().create(student("111", "Budi")).await.unwrap();
        let siti = repos.students().create(student("222", "Siti")).await.unwrap();

        let older = repos.certificates().create(cert("Lomba", &budi.id)).await.unwrap();
        let newer = repos.certificates().create(cert("Seminar", &siti.id)).await.unwrap();
        repos
            .certificates()
            .update(
                &newer.id,
                UpdateCertificateDto {
                    status: Some(CertificateStatus::Revoked),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let all = repos
            .certificates()
            .find_many(GetCertificateDto::default())
            .await
            .unwrap();
        assert_eq!(all[0].certificate.id, newer.id);
        assert_eq!(all[1].certificate.id, older.id);

        let by_nim = repos
            .certificates()
            .find_many(GetCertificateDto {
                search: Some("222".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_nim.len(), 1);
        assert_eq!(by_nim[0].student.as_ref().unwrap().name, "Siti");

        let revoked = repos
            .certificates()
            .find_many(GetCertificateDto {
                status: Some(CertificateStatus::Revoked),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(revoked.len(), 1);

        let counts = repos.certificates().count_by_status().await.unwrap();
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.revoked, 1);
        assert_eq!(counts.total(), 2);
        assert_eq!(repos.certificates().count_by_student(&budi.id).await.unwrap(), 1);

        let details = repos.certificates().find_details(&older.id).await.unwrap().unwrap();
        assert_eq!(details.student.unwrap().nim, "111");
    }

    #[tokio::test]
    async fn reopening_sees_previous_writes() {
        let dir = tempfile::tempdir().unwrap();
        {
            let repos = JsonRepositoryProvider::open(dir.path()).await.unwrap();
            repos.students().create(student("111", "Budi")).await.unwrap();
        }
        let repos = JsonRepositoryProvider::open(dir.path()).await.unwrap();
        assert_eq!(repos.students().count().await.unwrap(), 1);
        assert!(repos.ping().await.is_ok());
        assert_eq!(repos.backend_name(), "json");
    }
}
