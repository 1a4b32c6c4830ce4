use async_trait::async_trait;

use super::{CreateStudentDto, GetStudentDto, Student, UpdateStudentDto};
use crate::domain::DomainResult;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Student>>;
    async fn find_by_nim(&self, nim: &str) -> DomainResult<Option<Student>>;
    /// Ordered by name ascending.
    async fn find_many(&self, dto: GetStudentDto) -> DomainResult<Vec<Student>>;

    /// Fails with `Conflict` if the NIM is taken.
    async fn create(&self, dto: CreateStudentDto) -> DomainResult<Student>;
    async fn update(&self, id: &str, dto: UpdateStudentDto) -> DomainResult<Option<Student>>;
    async fn delete(&self, id: &str) -> DomainResult<Option<Student>>;

    async fn count(&self) -> DomainResult<u64>;
}
