use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Fails with `Conflict` if the username is taken.
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User>;
    /// Returns `None` if no user has this id.
    async fn update(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    /// Returns the removed record, or `None` if no user has this id.
    async fn delete(&self, id: &str) -> DomainResult<Option<User>>;

    async fn count(&self) -> DomainResult<u64>;
}
