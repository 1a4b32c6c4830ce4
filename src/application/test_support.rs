//! Shared fixtures for service tests: every test runs against both backends.

use std::sync::Arc;

use tempfile::TempDir;

use crate::domain::{CreateStudentDto, CreateUserDto, RepositoryProvider, Student, User, UserRole};
use crate::infrastructure::crypto::hash_password;
use crate::infrastructure::database::{
    init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider,
};
use crate::infrastructure::json_store::JsonRepositoryProvider;

pub async fn sqlite_provider() -> (TempDir, Arc<dyn RepositoryProvider>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("certhub.db");
    let db = init_database(&DatabaseConfig::sqlite(path.to_str().unwrap()))
        .await
        .unwrap();
    run_migrations(&db).await.unwrap();
    (dir, Arc::new(SeaOrmRepositoryProvider::new(db)))
}

pub async fn json_provider() -> (TempDir, Arc<dyn RepositoryProvider>) {
    let dir = tempfile::tempdir().unwrap();
    let repos = JsonRepositoryProvider::open(dir.path()).await.unwrap();
    (dir, Arc::new(repos))
}

pub async fn backends() -> Vec<(TempDir, Arc<dyn RepositoryProvider>)> {
    vec![sqlite_provider().await, json_provider().await]
}

pub async fn seed_user(
    repos: &dyn RepositoryProvider,
    username: &str,
    password: &str,
    role: UserRole,
) -> User {
    repos
        .users()
        .create(CreateUserDto {
            username: username.into(),
            password_hash: hash_password(password).unwrap(),
            name: username.into(),
            role,
        })
        .await
        .unwrap()
}

pub fn new_student(nim: &str, name: &str) -> CreateStudentDto {
    CreateStudentDto {
        nim: nim.into(),
        name: name.into(),
        email: format!("{nim}@example.com"),
        phone: None,
        address: None,
        date_of_birth: None,
        year: None,
        major: "Teknik Informatika".into(),
        enrollment_date: None,
    }
}

pub async fn seed_student(repos: &dyn RepositoryProvider, nim: &str, name: &str) -> Student {
    repos.students().create(new_student(nim, name)).await.unwrap()
}
