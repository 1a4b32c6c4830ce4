use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Certificate, CreateStudentDto, DomainError, DomainResult, GetCertificateDto, GetStudentDto,
    RepositoryProvider, Student, UpdateStudentDto,
};

const NIM_TAKEN: &str = "Student with this NIM already exists";

/// A student together with the certificates they own, newest first.
#[derive(Debug, Clone)]
pub struct StudentProfile {
    pub student: Student,
    pub certificates: Vec<Certificate>,
}

#[derive(Clone)]
pub struct StudentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StudentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, search: Option<String>) -> DomainResult<Vec<Student>> {
        self.repos.students().find_many(GetStudentDto { search }).await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Student> {
        self.repos
            .students()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", id))
    }

    pub async fn profile(&self, id: &str) -> DomainResult<StudentProfile> {
        let student = self.get(id).await?;
        let certificates = self
            .repos
            .certificates()
            .find_many(GetCertificateDto {
                student_id: Some(student.id.clone()),
                ..Default::default()
            })
            .await?
            .into_iter()
            .map(|d| d.certificate)
            .collect();

        Ok(StudentProfile {
            student,
            certificates,
        })
    }

    pub async fn create(&self, dto: CreateStudentDto) -> DomainResult<Student> {
        if self.repos.students().find_by_nim(&dto.nim).await?.is_some() {
            return Err(DomainError::Conflict(NIM_TAKEN.into()));
        }

        let student = self.repos.students().create(dto).await?;
        info!(student_id = %student.id, nim = %student.nim, "Student created");
        Ok(student)
    }

    pub async fn update(&self, id: &str, dto: UpdateStudentDto) -> DomainResult<Student> {
        let existing = self.get(id).await?;

        if let Some(nim) = dto.nim.as_deref() {
            if nim != existing.nim {
                if let Some(other) = self.repos.students().find_by_nim(nim).await? {
                    if other.id != existing.id {
                        return Err(DomainError::Conflict(NIM_TAKEN.into()));
                    }
                }
            }
        }

        let student = self
            .repos
            .students()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", id))?;
        info!(student_id = %student.id, "Student updated");
        Ok(student)
    }

    /// Delete a student who owns no certificates.
    pub async fn delete(&self, id: &str) -> DomainResult<Student> {
        self.get(id).await?;

        if self.repos.certificates().count_by_student(id).await? > 0 {
            return Err(DomainError::Validation(
                "Cannot delete student with certificates".into(),
            ));
        }

        let removed = self
            .repos
            .students()
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", id))?;
        info!(student_id = %removed.id, nim = %removed.nim, "Student deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{backends, new_student, seed_student};
    use crate::domain::CreateCertificateDto;

    #[tokio::test]
    async fn duplicate_nim_is_rejected() {
        for (_dir, repos) in backends().await {
            let students = StudentService::new(repos.clone());
            students.create(new_student("12345678", "Budi")).await.unwrap();

            match students.create(new_student("12345678", "Siti")).await {
                Err(DomainError::Conflict(msg)) => assert_eq!(msg, NIM_TAKEN),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn student_with_certificates_cannot_be_deleted() {
        for (_dir, repos) in backends().await {
            let students = StudentService::new(repos.clone());
            let owner = seed_student(repos.as_ref(), "111", "Budi").await;
            let free = seed_student(repos.as_ref(), "222", "Siti").await;
            repos
                .certificates()
                .create(CreateCertificateDto {
                    title: "Juara".into(),
                    description: None,
                    student_id: owner.id.clone(),
                    issue_date: None,
                    expiry_date: None,
                    file_url: None,
                    status: None,
                })
                .await
                .unwrap();

            match students.delete(&owner.id).await {
                Err(DomainError::Validation(msg)) => {
                    assert_eq!(msg, "Cannot delete student with certificates")
                }
                other => panic!("unexpected: {other:?}"),
            }

            students.delete(&free.id).await.unwrap();
            let remaining = students.list(None).await.unwrap();
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].id, owner.id);

            let profile = students.profile(&owner.id).await.unwrap();
            assert_eq!(profile.certificates.len(), 1);
        }
    }

    #[tokio::test]
    async fn update_keeps_own_nim_and_rejects_others() {
        for (_dir, repos) in backends().await {
            let students = StudentService::new(repos.clone());
            let budi = seed_student(repos.as_ref(), "111", "Budi").await;
            seed_student(repos.as_ref(), "222", "Siti").await;

            let renamed = students
                .update(
                    &budi.id,
                    UpdateStudentDto {
                        nim: Some("111".into()),
                        name: Some("Budi Santoso".into()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(renamed.name, "Budi Santoso");

            assert!(matches!(
                students
                    .update(
                        &budi.id,
                        UpdateStudentDto {
                            nim: Some("222".into()),
                            ..Default::default()
                        },
                    )
                    .await,
                Err(DomainError::Conflict(_))
            ));
            assert!(matches!(
                students.delete("missing").await,
                Err(DomainError::NotFound { .. })
            ));
        }
    }

    #[tokio::test]
    async fn update_clears_optional_fields_only_when_asked() {
        for (_dir, repos) in backends().await {
            let students = StudentService::new(repos.clone());
            let mut dto = new_student("333", "Rina");
            dto.phone = Some("08123".into());
            dto.address = Some("Jl. Merdeka 1".into());
            dto.date_of_birth = Some(chrono::Utc::now());
            dto.year = Some("2021".into());
            let rina = students.create(dto).await.unwrap();

            let kept = students
                .update(
                    &rina.id,
                    UpdateStudentDto {
                        name: Some("Rina Wati".into()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(kept.phone.as_deref(), Some("08123"));
            assert!(kept.date_of_birth.is_some());

            let cleared = students
                .update(
                    &rina.id,
                    UpdateStudentDto {
                        phone: Some(None),
                        address: Some(None),
                        date_of_birth: Some(None),
                        year: Some(None),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert!(cleared.phone.is_none());
            assert!(cleared.address.is_none());
            assert!(cleared.date_of_birth.is_none());
            assert!(cleared.year.is_none());
            assert_eq!(cleared.name, "Rina Wati");

            let stored = students.profile(&rina.id).await.unwrap().student;
            assert!(stored.phone.is_none());
            assert!(stored.year.is_none());
        }
    }
}
