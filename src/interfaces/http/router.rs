//! Router assembly and the OpenAPI document

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, MessageResponse};
use super::middleware::{require_session, route_guard, SESSION_COOKIE};
use super::modules::{auth, certificates, dashboard, health, metrics, public, students, users};
use super::state::AppState;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    SESSION_COOKIE,
                    "Session token set by POST /api/auth/login",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        auth::me,
        students::list_students,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
        certificates::list_certificates,
        certificates::get_certificate,
        certificates::create_certificate,
        certificates::update_certificate,
        certificates::delete_certificate,
        dashboard::dashboard_stats,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        public::public_certificate,
        public::verify_certificate,
    ),
    components(
        schemas(
            MessageResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            students::StudentDto,
            students::StudentDetailDto,
            students::StudentRequest,
            students::UpdateStudentRequest,
            certificates::CertificateDto,
            certificates::CertificateDetailDto,
            certificates::CreateCertificateRequest,
            certificates::UpdateCertificateRequest,
            dashboard::StatsDto,
            public::PublicCertificateDto,
            public::PublicStudentDto,
            public::VerifyRequest,
            health::HealthResponse,
            health::StorageHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and storage status"),
        (name = "Authentication", description = "Cookie-based login sessions"),
        (name = "Students", description = "Student records"),
        (name = "Certificates", description = "Certificate issuance and lifecycle"),
        (name = "Dashboard", description = "Aggregate statistics"),
        (name = "Users", description = "Staff and admin accounts (admin only)"),
        (name = "Public", description = "Unauthenticated certificate verification"),
    ),
    info(
        title = "CertHub API",
        version = "1.0.0",
        description = "Student certificate registry with public verification",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Not found")),
    )
}

/// Build the full application router.
///
/// `metrics` mounts `/metrics` when a Prometheus recorder is installed;
/// `static_dir` serves an exported front-end for every non-API path.
pub fn build_router(
    state: AppState,
    metrics: Option<PrometheusHandle>,
    static_dir: Option<PathBuf>,
) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route(
            "/certificates",
            get(certificates::list_certificates).post(certificates::create_certificate),
        )
        .route(
            "/certificates/{id}",
            get(certificates::get_certificate)
                .put(certificates::update_certificate)
                .delete(certificates::delete_certificate),
        )
        .route("/dashboard/stats", get(dashboard::dashboard_stats))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let open = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/public/certificates/{id}", get(public::public_certificate))
        .route("/public/verify", post(public::verify_certificate));

    let api = Router::new()
        .merge(protected)
        .merge(open)
        .fallback(not_found);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .with_state(state);

    if let Some(handle) = metrics {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics::MetricsState { handle }),
        );
    }

    router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router.fallback(not_found),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn(route_guard))
        .layer(middleware::from_fn(metrics::track_http_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::application::test_support::{backends, seed_student, seed_user};
    use crate::domain::{RepositoryProvider, UserRole};
    use crate::infrastructure::crypto::JwtConfig;

    struct Harness {
        _dir: TempDir,
        repos: Arc<dyn RepositoryProvider>,
        router: Router,
    }

    async fn harnesses() -> Vec<Harness> {
        let mut out = Vec::new();
        for (dir, repos) in backends().await {
            seed_user(repos.as_ref(), "admin", "admin123", UserRole::Admin).await;
            seed_user(repos.as_ref(), "staff", "staff123", UserRole::Staff).await;
            let state = AppState::new(repos.clone(), JwtConfig::default(), false);
            out.push(Harness {
                _dir: dir,
                repos,
                router: build_router(state, None, None),
            });
        }
        out
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn login(router: &Router, username: &str, password: &str) -> String {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "username": username, "password": password }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Strict"));
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials_and_missing_fields() {
        for h in harnesses().await {
            let (status, body) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/auth/login",
                    None,
                    json!({ "username": "admin", "password": "nope" }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["success"], false);

            let (status, _) = send(
                &h.router,
                json_request("POST", "/api/auth/login", None, json!({ "username": "admin" })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn protected_routes_need_a_session() {
        for h in harnesses().await {
            for uri in ["/api/students", "/api/certificates", "/api/dashboard/stats", "/api/auth/me"] {
                let (status, body) = send(&h.router, get_request(uri, None)).await;
                assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
                assert_eq!(body["error"], "Unauthorized");
            }

            let (status, _) = send(
                &h.router,
                get_request("/api/students", Some("auth-token=garbage")),
            )
            .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn staff_cannot_manage_users() {
        for h in harnesses().await {
            let cookie = login(&h.router, "staff", "staff123").await;
            let (status, body) = send(&h.router, get_request("/api/users", Some(cookie.as_str()))).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(body["error"], "Forbidden");

            // Role check precedes body validation.
            let (status, _) = send(
                &h.router,
                json_request("POST", "/api/users", Some(cookie.as_str()), json!({})),
            )
            .await;
            assert_eq!(status, StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn me_returns_the_session_user_without_password() {
        for h in harnesses().await {
            let cookie = login(&h.router, "admin", "admin123").await;
            let (status, body) = send(&h.router, get_request("/api/auth/me", Some(cookie.as_str()))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["username"], "admin");
            assert_eq!(body["data"]["role"], "ADMIN");
            assert!(body["data"].get("password").is_none());
        }
    }

    #[tokio::test]
    async fn student_with_certificate_cannot_be_deleted() {
        for h in harnesses().await {
            let cookie = login(&h.router, "staff", "staff123").await;
            let student = seed_student(h.repos.as_ref(), "2021001", "Ani").await;

            let (status, _) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/certificates",
                    Some(cookie.as_str()),
                    json!({ "title": "Lomba", "studentId": student.id }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);

            let uri = format!("/api/students/{}", student.id);
            let (status, body) = send(
                &h.router,
                Request::builder()
                    .method("DELETE")
                    .uri(&uri)
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Cannot delete student with certificates");

            let (status, body) = send(&h.router, get_request(&uri, Some(cookie.as_str()))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["certificates"].as_array().unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn certificate_for_unknown_student_is_not_found() {
        for h in harnesses().await {
            let cookie = login(&h.router, "staff", "staff123").await;
            let (status, body) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/certificates",
                    Some(cookie.as_str()),
                    json!({ "title": "Ghost", "studentId": "missing" }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"], "Student not found");
        }
    }

    #[tokio::test]
    async fn dashboard_counts_add_up() {
        for h in harnesses().await {
            let cookie = login(&h.router, "staff", "staff123").await;
            let student = seed_student(h.repos.as_ref(), "2021002", "Budi").await;
            for status in ["PENDING", "ISSUED", "ISSUED", "REVOKED"] {
                let (code, _) = send(
                    &h.router,
                    json_request(
                        "POST",
                        "/api/certificates",
                        Some(cookie.as_str()),
                        json!({ "title": "Cert", "studentId": student.id, "status": status }),
                    ),
                )
                .await;
                assert_eq!(code, StatusCode::CREATED);
            }

            let (status, body) =
                send(&h.router, get_request("/api/dashboard/stats", Some(cookie.as_str()))).await;
            assert_eq!(status, StatusCode::OK);
            let stats = &body["data"];
            assert_eq!(stats["totalStudents"], 1);
            assert_eq!(stats["totalCertificates"], 4);
            assert_eq!(stats["issuedCertificates"], 2);
            assert_eq!(stats["expiredCertificates"], 0);
        }
    }

    #[tokio::test]
    async fn public_verification_hides_private_fields() {
        for h in harnesses().await {
            let cookie = login(&h.router, "staff", "staff123").await;
            let student = seed_student(h.repos.as_ref(), "2021003", "Citra").await;
            let (_, created) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/certificates",
                    Some(cookie.as_str()),
                    json!({ "title": "Juara 1", "studentId": student.id }),
                ),
            )
            .await;
            let id = created["data"]["id"].as_str().unwrap().to_string();

            let (status, body) = send(
                &h.router,
                get_request(&format!("/api/public/certificates/{id}"), None),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["student"]["nim"], "2021003");
            assert!(body["data"]["student"].get("email").is_none());
            assert!(body["data"].get("fileUrl").is_none());

            let (status, body) = send(
                &h.router,
                json_request("POST", "/api/public/verify", None, json!({})),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Certificate ID is required");

            let (status, _) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/public/verify",
                    None,
                    json!({ "certificateId": "does-not-exist" }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn pages_without_cookie_redirect_to_login() {
        for h in harnesses().await {
            let response = h
                .router
                .clone()
                .oneshot(get_request("/dashboard/students", None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(
                response.headers()[header::LOCATION],
                "/auth/login?redirect=%2Fdashboard%2Fstudents"
            );

            let (status, _) = send(&h.router, get_request("/certificate/abc", None)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn whitespace_required_fields_are_rejected() {
        for h in harnesses().await {
            let staff = login(&h.router, "staff", "staff123").await;
            let admin = login(&h.router, "admin", "admin123").await;
            let student = seed_student(h.repos.as_ref(), "555", "Andi").await;

            let (status, body) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/students",
                    Some(staff.as_str()),
                    json!({ "nim": "   ", "name": "Andi", "major": "Sipil", "email": "a@example.com" }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "NIM is required");

            let (status, _) = send(
                &h.router,
                json_request(
                    "PUT",
                    &format!("/api/students/{}", student.id),
                    Some(staff.as_str()),
                    json!({ "nim": "555", "name": " ", "major": "Sipil", "email": "a@example.com" }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);

            let (status, _) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/certificates",
                    Some(staff.as_str()),
                    json!({ "title": "  ", "studentId": student.id }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);

            let (status, _) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/users",
                    Some(admin.as_str()),
                    json!({ "username": "\t", "name": "Nobody", "password": "x" }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);

            let stored = h.repos.students().find_by_id(&student.id).await.unwrap().unwrap();
            assert_eq!(stored.name, "Andi");
            assert_eq!(h.repos.students().count().await.unwrap(), 1);
            assert_eq!(h.repos.users().count().await.unwrap(), 2);
        }
    }

    #[tokio::test]
    async fn put_clears_nullable_fields() {
        for h in harnesses().await {
            let cookie = login(&h.router, "staff", "staff123").await;

            let (status, body) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/students",
                    Some(cookie.as_str()),
                    json!({
                        "nim": "777",
                        "name": "Rina",
                        "major": "Sipil",
                        "email": "r@example.com",
                        "phone": "08123",
                        "address": "Jl. Merdeka 1",
                        "dateOfBirth": "2001-02-03",
                        "year": "2021"
                    }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            let student_id = body["data"]["id"].as_str().unwrap().to_string();

            let (status, body) = send(
                &h.router,
                json_request(
                    "PUT",
                    &format!("/api/students/{student_id}"),
                    Some(cookie.as_str()),
                    json!({
                        "nim": "777",
                        "name": "Rina",
                        "major": "Sipil",
                        "email": "r@example.com",
                        "phone": null,
                        "address": "",
                        "dateOfBirth": null
                    }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert!(body["data"]["phone"].is_null());
            assert!(body["data"]["address"].is_null());
            assert!(body["data"]["dateOfBirth"].is_null());
            assert_eq!(body["data"]["year"], "2021");

            let (_, body) = send(
                &h.router,
                json_request(
                    "POST",
                    "/api/certificates",
                    Some(cookie.as_str()),
                    json!({
                        "title": "Juara",
                        "studentId": student_id,
                        "description": "Lomba",
                        "expiryDate": "2030-01-01",
                        "fileUrl": "https://files.example.com/c.pdf"
                    }),
                ),
            )
            .await;
            let cert_id = body["data"]["id"].as_str().unwrap().to_string();

            let (status, body) = send(
                &h.router,
                json_request(
                    "PUT",
                    &format!("/api/certificates/{cert_id}"),
                    Some(cookie.as_str()),
                    json!({ "description": null, "expiryDate": "", "fileUrl": null }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert!(body["data"]["description"].is_null());
            assert!(body["data"]["expiryDate"].is_null());
            assert!(body["data"]["fileUrl"].is_null());
            assert_eq!(body["data"]["title"], "Juara");
        }
    }

    #[tokio::test]
    async fn health_reports_backend() {
        for h in harnesses().await {
            let (status, body) = send(&h.router, get_request("/health", None)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "ok");
            assert_eq!(body["storage"]["backend"], h.repos.backend_name());
        }
    }

    #[test]
    fn openapi_document_lists_cookie_security() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(
            doc["components"]["securitySchemes"]["session_cookie"]["in"],
            "cookie"
        );
        assert!(doc["paths"]["/api/public/verify"].is_object());
    }
}
