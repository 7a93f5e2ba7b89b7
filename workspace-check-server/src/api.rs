//! HTTP API routes for the Workspace status checker.
//!
//! A single endpoint, `POST /check-domain`, mirrors the library's
//! fail-closed contract: a missing or empty `domain` is the only client
//! error (400). Everything else, including failed probes, answers 200
//! with a report the caller can inspect for the `error` flag.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use workspace_check_lib::WorkspaceChecker;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The checker is stateless per request; one instance serves all
    pub checker: Arc<WorkspaceChecker>,
}

/// Request body for POST /check-domain.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Raw domain input; normalized by the checker
    #[serde(default)]
    pub domain: Option<String>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/check-domain", post(check_domain))
        .with_state(state)
}

/// POST /check-domain handler.
async fn check_domain(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Response {
    let domain = match request.domain.as_deref().map(str::trim) {
        Some(domain) if !domain.is_empty() => domain.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Domain is required" })),
            )
                .into_response();
        }
    };

    tracing::info!(domain = %domain, "checking Workspace status");

    let report = state.checker.check_domain(&domain).await;

    if report.error {
        tracing::warn!(domain = %report.domain, message = %report.message, "probe failed");
    }

    (StatusCode::OK, Json(report)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;
    use workspace_check_lib::CheckConfig;

    /// State whose probes fail fast against a closed local port, so the
    /// tests never need external network access.
    fn offline_state() -> AppState {
        let config = CheckConfig::default()
            .with_endpoint("http://127.0.0.1:9/domain_in_use")
            .with_timeout(Duration::from_secs(2));
        AppState {
            checker: Arc::new(WorkspaceChecker::with_config(config)),
        }
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/check-domain")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_domain_returns_400() {
        let app = router(offline_state());

        let response = app.oneshot(post_json("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Domain is required");
    }

    #[tokio::test]
    async fn test_empty_domain_returns_400() {
        let app = router(offline_state());

        let response = app
            .oneshot(post_json(r#"{"domain": "  "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Domain is required");
    }

    #[tokio::test]
    async fn test_probe_failure_still_answers_200() {
        let app = router(offline_state());

        let response = app
            .oneshot(post_json(r#"{"domain": "example.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["domain"], "example.com");
        assert_eq!(json["available"], false);
        assert_eq!(json["error"], true);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Error checking domain:"));
    }

    #[tokio::test]
    async fn test_domain_is_normalized_before_checking() {
        let app = router(offline_state());

        let response = app
            .oneshot(post_json(r#"{"domain": "https://sub.example.com/path"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["domain"], "sub.example.com");
    }
}
