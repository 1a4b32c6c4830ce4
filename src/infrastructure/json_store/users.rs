use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::collection::JsonCollection;
use super::records::UserRecord;
use crate::domain::{CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepository};

const USERNAME_TAKEN: &str = "Username already exists";

pub struct JsonUserRepository {
    users: Arc<JsonCollection<UserRecord>>,
}

impl JsonUserRepository {
    pub fn new(users: Arc<JsonCollection<UserRecord>>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserRepository for JsonUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let users = self.users.read_all().await?;
        Ok(users.into_iter().find(|u| u.id == id).map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let users = self.users.read_all().await?;
        Ok(users
            .into_iter()
            .find(|u| u.username == username)
            .map(User::from))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut users = self.users.read_all().await?;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        self.users
            .mutate(|users| {
                if users.iter().any(|u| u.username == dto.username) {
                    return Err(DomainError::Conflict(USERNAME_TAKEN.into()));
                }

                let now = Utc::now();
                let record = UserRecord {
                    id: Uuid::new_v4().to_string(),
                    username: dto.username,
                    password: dto.password_hash,
                    name: dto.name,
                    role: dto.role,
                    created_at: now,
                    updated_at: now,
                };
                users.push(record.clone());
                Ok(record.into())
            })
            .await
    }

    async fn update(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        self.users
            .mutate(|users| {
                if let Some(username) = &dto.username {
                    if users.iter().any(|u| u.id != id && &u.username == username) {
                        return Err(DomainError::Conflict(USERNAME_TAKEN.into()));
                    }
                }

                let Some(record) = users.iter_mut().find(|u| u.id == id) else {
                    return Ok(None);
                };
                if let Some(username) = dto.username {
                    record.username = username;
                }
                if let Some(name) = dto.name {
                    record.name = name;
                }
                if let Some(role) = dto.role {
                    record.role = role;
                }
                if let Some(password_hash) = dto.password_hash {
                    record.password = password_hash;
                }
                record.updated_at = Utc::now();
                Ok(Some(record.clone().into()))
            })
            .await
    }

    async fn delete(&self, id: &str) -> DomainResult<Option<User>> {
        self.users
            .mutate(|users| {
                let removed = users
                    .iter()
                    .position(|u| u.id == id)
                    .map(|index| users.remove(index));
                Ok(removed.map(User::from))
            })
            .await
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.read_all().await?.len() as u64)
    }
}
