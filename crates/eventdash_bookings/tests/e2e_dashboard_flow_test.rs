// Full dashboard flow: router -> dashboard -> HTTP clients -> mocked upstream.


use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use eventdash_bookings::{routes::routes, CancellationWorkflow, Dashboard, Navigation};
use fixtures::{booking_service, bookings_payload, session_payload, session_provider};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn upstream() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_payload("nadia")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookings_payload()))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn app(server: &MockServer, cancel_timeout: Option<Duration>) -> Router {
    let dashboard = Dashboard::new(
        CancellationWorkflow::new(Arc::new(booking_service(server)), cancel_timeout),
        Arc::new(session_provider(server)),
        Navigation::default(),
        "TK",
    );
    Router::new().nest("/api", routes(Arc::new(dashboard)))
}

async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_open_then_cancel_booking() {
    let server = upstream().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bookings/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;
    let router = app(&server, None);

    let (status, body) = call(&router, Method::GET, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["total_tickets"], 3);
    assert_eq!(body["total_cost_display"], "2000 TK");
    assert_eq!(body["bookings"][0]["details_href"], "/events/ev-7");

    let (status, body) = call(&router, Method::DELETE, "/api/dashboard/bookings/a").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_cancel"]["outcome"], "cancelled");
    assert_eq!(body["totals"]["total_tickets"], 1);
    assert_eq!(body["total_cost_display"], "1000 TK");

    // the list is not fetched again after the cancellation
    let (_, body) = call(&router, Method::GET, "/api/dashboard").await;
    assert_eq!(body["bookings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejected_cancel_keeps_booking() {
    let server = upstream().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bookings/b"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already started"))
        .mount(&server)
        .await;
    let router = app(&server, None);

    let (_, body) = call(&router, Method::DELETE, "/api/dashboard/bookings/b").await;

    assert_eq!(body["last_cancel"]["outcome"], "failed");
    assert!(body["last_cancel"]["reason"]
        .as_str()
        .unwrap()
        .contains("already started"));
    assert_eq!(body["totals"]["total_tickets"], 3);
    assert!(body["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["state"] == "idle"));
}

#[tokio::test]
async fn test_slow_cancel_times_out() {
    let server = upstream().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bookings/a"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let router = app(&server, Some(Duration::from_millis(200)));

    let (_, body) = call(&router, Method::DELETE, "/api/dashboard/bookings/a").await;

    assert_eq!(body["last_cancel"]["outcome"], "failed");
    assert_eq!(body["bookings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unreachable_booking_service_shows_empty_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_payload("nadia")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let router = app(&server, None);

    let (status, body) = call(&router, Method::GET, "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_empty"], true);
    assert_eq!(body["total_cost_display"], "0 TK");
}

#[tokio::test]
async fn test_signed_out_user_is_sent_home() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    let router = app(&server, None);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}
