//! Per-request counters and latency histograms

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

pub const REQUESTS_TOTAL: &str = "certhub_http_requests_total";
pub const REQUEST_DURATION: &str = "certhub_http_request_duration_seconds";

/// Label requests by their route template so ids don't explode cardinality.
/// Anything that matched no route shares one label.
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned())
}

pub async fn track_http_metrics(request: Request<Body>, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let route = route_label(&request);
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        REQUESTS_TOTAL,
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION, "method" => method, "route" => route)
        .record(started.elapsed().as_secs_f64());

    response
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    use super::*;

    async fn echo_route_label(request: Request<Body>, next: Next) -> Response {
        let label = route_label(&request);
        let mut response = next.run(request).await;
        response
            .headers_mut()
            .insert("x-route", HeaderValue::from_str(&label).unwrap());
        response
    }

    #[tokio::test]
    async fn nested_routes_are_labelled_by_template() {
        let api = Router::new().route("/students/{id}", get(|| async { "ok" }));
        let router = Router::new()
            .nest("/api", api)
            .layer(middleware::from_fn(echo_route_label))
            .layer(middleware::from_fn(track_http_metrics));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/students/123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(response.headers()["x-route"], "/api/students/{id}");
    }

    #[test]
    fn unmatched_requests_share_a_label() {
        let request = Request::builder()
            .uri("/api/students/123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(route_label(&request), "unmatched");
    }
}
