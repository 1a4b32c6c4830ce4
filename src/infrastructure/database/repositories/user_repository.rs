use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{db_err, map_db_err};
use crate::domain::{CreateUserDto, DomainResult, UpdateUserDto, User, UserRepository, UserRole};
use crate::infrastructure::database::entities::user;

const USERNAME_TAKEN: &str = "Username already exists";

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Staff => UserRole::Staff,
    }
}

fn role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Staff => user::UserRole::Staff,
    }
}

fn to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        name: model.name,
        role: role_to_domain(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(dto.username),
            password_hash: Set(dto.password_hash),
            name: Set(dto.name),
            role: Set(role_to_entity(dto.role)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err(e, USERNAME_TAKEN))?;
        Ok(to_domain(inserted))
    }

    async fn update(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(username) = dto.username {
            active.username = Set(username);
        }
        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(role) = dto.role {
            active.role = Set(role_to_entity(role));
        }
        if let Some(password_hash) = dto.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| map_db_err(e, USERNAME_TAKEN))?;
        Ok(Some(to_domain(updated)))
    }

    async fn delete(&self, id: &str) -> DomainResult<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id)
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
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
