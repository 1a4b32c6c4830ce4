//! Account management service
//!
//! Admin-facing user rules live here; HTTP handlers stay thin wrappers.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, RepositoryProvider, UpdateUserDto, User, UserRole,
};
use crate::infrastructure::crypto::hash_password;
use crate::shared::errors::InfraError;

const USERNAME_TAKEN: &str = "Username already exists";

/// A new account with a plaintext password
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}

/// Account edits. An empty or absent password keeps the current one.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    pub async fn get(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    pub async fn create(&self, account: NewAccount) -> DomainResult<User> {
        if self
            .repos
            .users()
            .find_by_username(&account.username)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(USERNAME_TAKEN.into()));
        }

        let password_hash = hash(&account.password)?;
        let user = self
            .repos
            .users()
            .create(CreateUserDto {
                username: account.username,
                password_hash,
                name: account.name,
                role: account.role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn update(&self, id: &str, changes: AccountChanges) -> DomainResult<User> {
        let existing = self.get(id).await?;

        if let Some(username) = changes.username.as_deref() {
            if username != existing.username {
                if let Some(other) = self.repos.users().find_by_username(username).await? {
                    if other.id != existing.id {
                        return Err(DomainError::Conflict(USERNAME_TAKEN.into()));
                    }
                }
            }
        }

        let password_hash = match changes.password.as_deref() {
            Some(p) if !p.is_empty() => Some(hash(p)?),
            _ => None,
        };

        let updated = self
            .repos
            .users()
            .update(
                id,
                UpdateUserDto {
                    username: changes.username,
                    name: changes.name,
                    role: changes.role,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        info!(user_id = %updated.id, "User updated");
        Ok(updated)
    }

    /// Delete an account. Callers may not delete themselves.
    pub async fn delete(&self, caller: &User, id: &str) -> DomainResult<User> {
        self.get(id).await?;

        if caller.id == id {
            return Err(DomainError::Validation(
                "Cannot delete your own account".into(),
            ));
        }

        let removed = self
            .repos
            .users()
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        info!(user_id = %removed.id, deleted_by = %caller.id, "User deleted");
        Ok(removed)
    }

    /// Create the configured accounts when no user exists yet.
    ///
    /// Returns how many accounts were created.
    pub async fn bootstrap(&self, accounts: &[NewAccount]) -> DomainResult<usize> {
        if self.repos.users().count().await? > 0 {
            return Ok(0);
        }

        let mut created = 0;
        for account in accounts {
            match self.create(account.clone()).await {
                Ok(_) => created += 1,
                Err(DomainError::Conflict(_)) => {
                    warn!(username = %account.username, "Skipping duplicate bootstrap account");
                }
                Err(e) => return Err(e),
            }
        }

        if created > 0 {
            info!(count = created, "Bootstrapped default accounts");
        }
        Ok(created)
    }
}

fn hash(password: &str) -> DomainResult<String> {
    hash_password(password).map_err(|e| InfraError::from(e).into())
}
