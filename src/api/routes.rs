//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{calculate, expose_metrics, health, hello, info, AppState};
use super::middleware::track_request_metrics;

/// Create the API router.
///
/// The metrics middleware wraps every route, including `/metrics` itself
/// and the 404 fallback, so scrapes show up in the latency histograms too.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/calculate", get(calculate))
        .route("/metrics", get(expose_metrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            track_request_metrics,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use crate::config::Config;

    fn test_router() -> Router {
        let recorder = PrometheusBuilder::new().build_recorder();
        let config = Config {
            environment: "test".to_string(),
            fault_injection: false,
            ..Config::default()
        };
        create_router(AppState::new(config, recorder.handle()))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let (status, body) = get_json(test_router(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "devops-lab");
    }

    #[tokio::test]
    async fn hello_endpoint_reports_environment_and_visits() {
        let app = test_router();

        let (status, body) = get_json(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello from DevOps Lab!");
        assert_eq!(body["environment"], "test");
        assert_eq!(body["visits"], 1);

        let (_, body) = get_json(app, "/").await;
        assert_eq!(body["visits"], 2);
    }

    #[tokio::test]
    async fn info_endpoint_returns_metadata() {
        let (status, body) = get_json(test_router(), "/info").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["app_name"], "DevOps Lab App");
        assert_eq!(body["framework"], "Axum");
    }

    #[tokio::test]
    async fn calculate_endpoint_covers_all_branches() {
        let app = test_router();

        let (_, body) = get_json(app.clone(), "/calculate?x=11&y=11").await;
        assert_eq!(body["result"], 121);

        let (_, body) = get_json(app.clone(), "/calculate?x=11&y=5").await;
        assert_eq!(body["result"], 16);

        let (_, body) = get_json(app.clone(), "/calculate?x=5&y=20").await;
        assert_eq!(body["result"], 0);

        // No params: defaults x=5, y=3.
        let (status, body) = get_json(app, "/calculate").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 0);
    }

    #[tokio::test]
    async fn calculate_endpoint_rejects_malformed_params() {
        let (status, body) = get_json(test_router(), "/calculate?x=abc").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_text_exposition() {
        let app = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
