//! End-to-end API flow against both storage backends.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use certhub::application::UserService;
use certhub::config::BootstrapConfig;
use certhub::domain::RepositoryProvider;
use certhub::infrastructure::crypto::JwtConfig;
use certhub::infrastructure::database::run_migrations;
use certhub::{
    build_router, init_database, AppState, DatabaseConfig, JsonRepositoryProvider,
    SeaOrmRepositoryProvider,
};

async fn sqlite_repos(dir: &TempDir) -> Arc<dyn RepositoryProvider> {
    let path = dir.path().join("certhub.db");
    let db = init_database(&DatabaseConfig::sqlite(path.to_str().unwrap()))
        .await
        .unwrap();
    run_migrations(&db).await.unwrap();
    Arc::new(SeaOrmRepositoryProvider::new(db))
}

async fn json_repos(dir: &TempDir) -> Arc<dyn RepositoryProvider> {
    Arc::new(JsonRepositoryProvider::open(dir.path()).await.unwrap())
}

async fn app(repos: Arc<dyn RepositoryProvider>) -> Router {
    let created = UserService::new(repos.clone())
        .bootstrap(&BootstrapConfig::default().new_accounts())
        .await
        .unwrap();
    assert_eq!(created, 2);
    build_router(AppState::new(repos, JwtConfig::default(), false), None, None)
}

struct Client {
    router: Router,
    cookie: Option<String>,
}

impl Client {
    async fn call(&mut self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        if let Some(set) = response.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = Some(pair).filter(|p| p != "auth-token=");
        }
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

async fn run_flow(router: Router) {
    let mut client = Client {
        router,
        cookie: None,
    };

    let (status, _) = client.call("GET", "/api/students", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = client
        .call(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "staff", "password": "staff123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "STAFF");
    assert!(client.cookie.is_some());

    let (status, body) = client
        .call(
            "POST",
            "/api/students",
            Some(json!({
                "nim": "99999999",
                "name": "Test User",
                "major": "Test",
                "email": "t@example.com"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = client
        .call(
            "POST",
            "/api/students",
            Some(json!({
                "nim": "99999999",
                "name": "Someone Else",
                "major": "Test",
                "email": "s@example.com"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = client
        .call(
            "POST",
            "/api/certificates",
            Some(json!({ "title": "Test Cert", "studentId": student_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "PENDING");
    let cert_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = client
        .call(
            "PUT",
            &format!("/api/certificates/{cert_id}"),
            Some(json!({ "status": "ISSUED" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ISSUED");
    assert_eq!(body["data"]["title"], "Test Cert");

    let (status, body) = client
        .call("GET", &format!("/api/certificates/{cert_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ISSUED");
    assert!(body["data"]["issueDate"].is_string());
    assert_eq!(body["data"]["student"]["nim"], "99999999");

    let (status, body) = client
        .call("GET", "/api/certificates?status=ISSUED&search=test", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = client.call("GET", "/api/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCertificates"], 1);
    assert_eq!(body["data"]["issuedCertificates"], 1);

    let (status, _) = client.call("GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = client.call("POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(client.cookie.is_none());

    let (status, body) = client
        .call(
            "POST",
            "/api/public/verify",
            Some(json!({ "certificateId": cert_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ISSUED");
    assert_eq!(body["data"]["student"]["name"], "Test User");

    let (status, _) = client.call("GET", "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

async fn run_admin_flow(router: Router) {
    let mut client = Client {
        router,
        cookie: None,
    };

    let (_, body) = client
        .call(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "admin", "password": "admin123" })),
        )
        .await;
    let admin_id = body["data"]["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = client.call("GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let staff_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "staff")
        .and_then(|u| u["id"].as_str())
        .unwrap()
        .to_string();

    let (status, body) = client
        .call("DELETE", &format!("/api/users/{admin_id}"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot delete your own account");

    let (status, _) = client
        .call("DELETE", &format!("/api/users/{staff_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = client
        .call("GET", &format!("/api/users/{staff_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn staff_flow_on_database_backend() {
    let dir = tempfile::tempdir().unwrap();
    run_flow(app(sqlite_repos(&dir).await).await).await;
}

#[tokio::test]
async fn staff_flow_on_json_backend() {
    let dir = tempfile::tempdir().unwrap();
    run_flow(app(json_repos(&dir).await).await).await;
}

#[tokio::test]
async fn admin_flow_on_both_backends() {
    let db_dir = tempfile::tempdir().unwrap();
    run_admin_flow(app(sqlite_repos(&db_dir).await).await).await;

    let json_dir = tempfile::tempdir().unwrap();
    run_admin_flow(app(json_repos(&json_dir).await).await).await;
}

#[tokio::test]
async fn deleted_user_session_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repos = json_repos(&dir).await;
    let router = app(repos.clone()).await;
    let mut client = Client {
        router,
        cookie: None,
    };
    client
        .call(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "staff", "password": "staff123" })),
        )
        .await;

    let staff = repos.users().find_by_username("staff").await.unwrap().unwrap();
    repos.users().delete(&staff.id).await.unwrap();

    let (status, _) = client.call("GET", "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
