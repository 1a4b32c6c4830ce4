use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::collection::JsonCollection;
use super::records::StudentRecord;
use crate::domain::{
    CreateStudentDto, DomainError, DomainResult, GetStudentDto, Student, StudentRepository,
    UpdateStudentDto,
};
use crate::shared::normalize_search;

const NIM_TAKEN: &str = "Student with this NIM already exists";

pub struct JsonStudentRepository {
    students: Arc<JsonCollection<StudentRecord>>,
}

impl JsonStudentRepository {
    pub fn new(students: Arc<JsonCollection<StudentRecord>>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl StudentRepository for JsonStudentRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Student>> {
        let students = self.students.read_all().await?;
        Ok(students.into_iter().find(|s| s.id == id).map(Student::from))
    }

    async fn find_by_nim(&self, nim: &str) -> DomainResult<Option<Student>> {
        let students = self.students.read_all().await?;
        Ok(students.into_iter().find(|s| s.nim == nim).map(Student::from))
    }

    async fn find_many(&self, dto: GetStudentDto) -> DomainResult<Vec<Student>> {
        let needle = normalize_search(dto.search.as_deref());

        let mut students: Vec<Student> = self
            .students
            .read_all()
            .await?
            .into_iter()
            .map(Student::from)
            .filter(|s| needle.as_deref().map_or(true, |n| s.matches_search(n)))
            .collect();
        students.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(students)
    }

    async fn create(&self, dto: CreateStudentDto) -> DomainResult<Student> {
        self.students
            .mutate(|students| {
                if students.iter().any(|s| s.nim == dto.nim) {
                    return Err(DomainError::Conflict(NIM_TAKEN.into()));
                }

                let now = Utc::now();
                let record = StudentRecord {
                    id: Uuid::new_v4().to_string(),
                    nim: dto.nim,
                    name: dto.name,
                    email: dto.email,
                    phone: dto.phone,
                    address: dto.address,
                    date_of_birth: dto.date_of_birth,
                    year: dto.year,
                    major: dto.major,
                    enrollment_date: dto.enrollment_date.unwrap_or(now),
                    created_at: now,
                    updated_at: now,
                };
                students.push(record.clone());
                Ok(record.into())
            })
            .await
    }

    async fn update(&self, id: &str, dto: UpdateStudentDto) -> DomainResult<Option<Student>> {
        self.students
            .mutate(|students| {
                if let Some(nim) = &dto.nim {
                    if students.iter().any(|s| s.id != id && &s.nim == nim) {
                        return Err(DomainError::Conflict(NIM_TAKEN.into()));
                    }
                }

                let Some(record) = students.iter_mut().find(|s| s.id == id) else {
                    return Ok(None);
                };
                if let Some(nim) = dto.nim {
                    record.nim = nim;
                }
                if let Some(name) = dto.name {
                    record.name = name;
                }
                if let Some(email) = dto.email {
                    record.email = email;
                }
                if let Some(phone) = dto.phone {
                    record.phone = phone;
                }
                if let Some(address) = dto.address {
                    record.address = address;
                }
                if let Some(date_of_birth) = dto.date_of_birth {
                    record.date_of_birth = date_of_birth;
                }
                if let Some(year) = dto.year {
                    record.year = year;
                }
                if let Some(major) = dto.major {
                    record.major = major;
                }
                if let Some(enrollment_date) = dto.enrollment_date {
                    record.enrollment_date = enrollment_date;
                }
                record.updated_at = Utc::now();
                Ok(Some(record.clone().into()))
            })
            .await
    }

    async fn delete(&self, id: &str) -> DomainResult<Option<Student>> {
        self.students
            .mutate(|students| {
                let removed = students
                    .iter()
                    .position(|s| s.id == id)
                    .map(|index| students.remove(index));
                Ok(removed.map(Student::from))
            })
            .await
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.students.read_all().await?.len() as u64)
    }
}
