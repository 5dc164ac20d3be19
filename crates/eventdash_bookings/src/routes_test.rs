#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use eventdash_common::{Booking, EventSnapshot, SessionStatus};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::dashboard::Dashboard;
    use crate::mock::MockBookingService;
    use crate::navigation::Navigation;
    use crate::routes::routes;
    use crate::session::StaticSessionProvider;
    use crate::workflow::CancellationWorkflow;

    fn app(status: SessionStatus) -> (Arc<MockBookingService>, Router) {
        let service = Arc::new(MockBookingService::with_bookings(vec![
            Booking::new("a")
                .with_quantity(2)
                .with_event(EventSnapshot::priced(500.0)),
            Booking::new("b").with_event(EventSnapshot::priced(1000.0)),
        ]));
        let dashboard = Dashboard::new(
            CancellationWorkflow::new(service.clone(), None),
            Arc::new(StaticSessionProvider::new(status)),
            Navigation::default(),
            "TK",
        );
        (service, routes(Arc::new(dashboard)))
    }

    async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Option<String>, Value) {
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
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, location, body)
    }

    #[tokio::test]
    async fn test_get_dashboard() {
        let (_, router) = app(SessionStatus::authenticated("nadia"));

        let (status, _, body) = send(&router, Method::GET, "/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_initial"], "N");
        assert_eq!(body["totals"]["total_tickets"], 3);
        assert_eq!(body["total_cost_display"], "2000 TK");
        assert_eq!(body["bookings"].as_array().unwrap().len(), 2);
        assert_eq!(body["bookings"][0]["state"], "idle");
        assert!(body.get("last_cancel").is_none());
    }

    #[tokio::test]
    async fn test_dashboard_redirects_without_session() {
        let (_, router) = app(SessionStatus::Unauthenticated);

        let (status, location, body) = send(&router, Method::GET, "/dashboard").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/"));
        assert_eq!(body["redirect"], "/");
    }

    #[tokio::test]
    async fn test_dashboard_while_session_loading() {
        let (_, router) = app(SessionStatus::Loading);

        let (status, _, body) = send(&router, Method::GET, "/dashboard").await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["status"], "loading");
    }

    #[tokio::test]
    async fn test_refresh_refetches() {
        let (service, router) = app(SessionStatus::authenticated("nadia"));
        send(&router, Method::GET, "/dashboard").await;

        let (status, _, _) = send(&router, Method::POST, "/dashboard/refresh").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(service.list_count(), 2);
    }

    #[tokio::test]
    async fn test_cancel_booking() {
        let (service, router) = app(SessionStatus::authenticated("nadia"));

        let (status, _, body) = send(&router, Method::DELETE, "/dashboard/bookings/a").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["last_cancel"]["outcome"], "cancelled");
        assert_eq!(body["totals"]["total_tickets"], 1);
        assert_eq!(body["total_cost_display"], "1000 TK");
        assert_eq!(service.delete_calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_failed_cancel_is_reported() {
        let (service, router) = app(SessionStatus::authenticated("nadia"));
        service.fail_delete("a");

        let (status, _, body) = send(&router, Method::DELETE, "/dashboard/bookings/a").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["last_cancel"]["outcome"], "failed");
        assert!(body["last_cancel"]["reason"].as_str().unwrap().contains("500"));
        assert_eq!(body["bookings"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_unknown_booking() {
        let (service, router) = app(SessionStatus::authenticated("nadia"));

        let (_, _, body) = send(&router, Method::DELETE, "/dashboard/bookings/zzz").await;

        assert_eq!(body["last_cancel"]["outcome"], "not_found");
        assert!(service.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_blank_id_is_rejected() {
        let (service, router) = app(SessionStatus::authenticated("nadia"));

        let (status, _, body) = send(&router, Method::DELETE, "/dashboard/bookings/%20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
        assert!(service.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_id_is_not_trimmed() {
        let (service, router) = app(SessionStatus::authenticated("nadia"));

        let (status, _, body) = send(&router, Method::DELETE, "/dashboard/bookings/%20a%20").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["last_cancel"]["outcome"], "not_found");
        assert_eq!(body["bookings"].as_array().unwrap().len(), 2);
        assert!(service.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn test_show_all_events() {
        let (_, router) = app(SessionStatus::authenticated("nadia"));

        let (status, location, _) = send(&router, Method::GET, "/dashboard/events").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/events"));
    }

    #[tokio::test]
    async fn test_home() {
        let (_, router) = app(SessionStatus::authenticated("nadia"));
        let (status, location, _) = send(&router, Method::GET, "/home").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/dashboard"));

        let (_, router) = app(SessionStatus::Unauthenticated);
        let (status, _, body) = send(&router, Method::GET, "/home").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["browse_events_href"], "/events");
        assert_eq!(body["sign_in_href"], "/auth/signin");
    }
}
