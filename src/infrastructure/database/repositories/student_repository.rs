use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{db_err, lower_contains, map_db_err, sql_can_match};
use crate::domain::{
    CreateStudentDto, DomainResult, GetStudentDto, Student, StudentRepository, UpdateStudentDto,
};
use crate::infrastructure::database::entities::student;
use crate::shared::normalize_search;

const NIM_TAKEN: &str = "Student with this NIM already exists";

pub struct SeaOrmStudentRepository {
    db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn to_domain(model: student::Model) -> Student {
    Student {
        id: model.id,
        nim: model.nim,
        name: model.name,
        email: model.email,
        phone: model.phone,
        address: model.address,
        date_of_birth: model.date_of_birth,
        year: model.year,
        major: model.major,
        enrollment_date: model.enrollment_date,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Student>> {
        let model = student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(to_domain))
    }

    async fn find_by_nim(&self, nim: &str) -> DomainResult<Option<Student>> {
        let model = student::Entity::find()
            .filter(student::Column::Nim.eq(nim))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(to_domain))
    }

    async fn find_many(&self, dto: GetStudentDto) -> DomainResult<Vec<Student>> {
        let mut query = student::Entity::find();
        let needle = normalize_search(dto.search.as_deref());

        if let Some(needle) = needle.as_deref().filter(|n| sql_can_match(n)) {
            query = query.filter(
                Condition::any()
                    .add(lower_contains((student::Entity, student::Column::Name), needle))
                    .add(lower_contains((student::Entity, student::Column::Nim), needle))
                    .add(lower_contains((student::Entity, student::Column::Major), needle)),
            );
        }

        let models = query
            .order_by_asc(student::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let mut students: Vec<Student> = models.into_iter().map(to_domain).collect();
        if let Some(needle) = needle.as_deref().filter(|n| !sql_can_match(n)) {
            students.retain(|s| s.matches_search(needle));
        }
        Ok(students)
    }

    async fn create(&self, dto: CreateStudentDto) -> DomainResult<Student> {
        let now = Utc::now();
        let model = student::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            nim: Set(dto.nim),
            name: Set(dto.name),
            email: Set(dto.email),
            phone: Set(dto.phone),
            address: Set(dto.address),
            date_of_birth: Set(dto.date_of_birth),
            year: Set(dto.year),
            major: Set(dto.major),
            enrollment_date: Set(dto.enrollment_date.unwrap_or(now)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err(e, NIM_TAKEN))?;
        Ok(to_domain(inserted))
    }

    async fn update(&self, id: &str, dto: UpdateStudentDto) -> DomainResult<Option<Student>> {
        let Some(existing) = student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: student::ActiveModel = existing.into();
        if let Some(nim) = dto.nim {
            active.nim = Set(nim);
        }
        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(phone) = dto.phone {
            active.phone = Set(phone);
        }
        if let Some(address) = dto.address {
            active.address = Set(address);
        }
        if let Some(date_of_birth) = dto.date_of_birth {
            active.date_of_birth = Set(date_of_birth);
        }
        if let Some(year) = dto.year {
            active.year = Set(year);
        }
        if let Some(major) = dto.major {
            active.major = Set(major);
        }
        if let Some(enrollment_date) = dto.enrollment_date {
            active.enrollment_date = Set(enrollment_date);
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| map_db_err(e, NIM_TAKEN))?;
        Ok(Some(to_domain(updated)))
    }

    async fn delete(&self, id: &str) -> DomainResult<Option<Student>> {
        let Some(existing) = student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        existing.clone().delete(&self.db).await.map_err(db_err)?;
        Ok(Some(to_domain(existing)))
    }

    async fn count(&self) -> DomainResult<u64> {
        student::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
