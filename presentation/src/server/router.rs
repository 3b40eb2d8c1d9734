//! Route table

use super::handlers;
use super::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/ask", post(handlers::ask))
        .route("/web-ask", post(handlers::web_ask))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::csrf::CsrfTokens;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use fusion_application::{
        CompletionRequest, FusionConfig, GatewayError, JudgeFailurePolicy, LlmGateway,
        RunFusionUseCase,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tower::ServiceExt;

    const KEY: &str = "test-key";
    const JUDGE_REPLY: &str =
        "FINAL: Quantum computing uses qubits | REASON: All three models agree";

    /// Gateway answering every model and counting calls
    struct CountingGateway {
        calls: AtomicUsize,
        judge_fails: bool,
    }

    impl CountingGateway {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                judge_fails: false,
            }
        }

        fn failing_judge() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                judge_fails: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmGateway for CountingGateway {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match request.model_id.as_str() {
                "judge" if self.judge_fails => Err(GatewayError::UpstreamError("HTTP 503".into())),
                "judge" => Ok(JUDGE_REPLY.to_string()),
                other => Ok(format!("answer from {}", other)),
            }
        }
    }

    fn app_with(gateway: Arc<CountingGateway>, config: FusionConfig, api_key: Option<&str>) -> Router {
        let fusion = Arc::new(RunFusionUseCase::new(gateway, Arc::new(config)));
        let csrf = CsrfTokens::new(b"csrf-secret", Duration::from_secs(3600)).unwrap();
        build_router(AppState::new(fusion, csrf).with_api_key(api_key))
    }

    fn config() -> FusionConfig {
        FusionConfig::new(["model-a", "model-b", "model-c"], "judge")
    }

    fn app(gateway: Arc<CountingGateway>) -> Router {
        app_with(gateway, config(), Some(KEY))
    }

    fn ask_request(key: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/ask")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(key) = key {
            builder = builder.header("code-x-key", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn web_ask_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/web-ask")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(CountingGateway::new()))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ask_end_to_end() {
        let gateway = Arc::new(CountingGateway::new());
        let response = app(gateway.clone())
            .oneshot(ask_request(
                Some(KEY),
                r#"{"question": "What is quantum computing?"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["input"], "What is quantum computing?");
        assert_eq!(body["judge"]["final_answer"], "Quantum computing uses qubits");
        assert_eq!(body["judge"]["reasoning"], "All three models agree");
        assert!(body.get("models").is_none());
        assert_eq!(gateway.calls(), 4);
    }

    #[tokio::test]
    async fn test_ask_exposes_models_when_enabled() {
        let gateway = Arc::new(CountingGateway::new());
        let app = app_with(gateway, config().with_show_model_output(true), Some(KEY));

        let response = app
            .oneshot(ask_request(Some(KEY), r#"{"question": "Q?", "system_message": "be brief"}"#))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["models"]["MODEL1"], "answer from model-a");
        assert_eq!(body["models"]["MODEL3"], "answer from model-c");
    }

    #[tokio::test]
    async fn test_ask_without_key_makes_no_upstream_calls() {
        let gateway = Arc::new(CountingGateway::new());

        let missing = app(gateway.clone())
            .oneshot(ask_request(None, r#"{"question": "Q?"}"#))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = app(gateway.clone())
            .oneshot(ask_request(Some("nope"), r#"{"question": "Q?"}"#))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(wrong).await["error"], "Invalid API key");

        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_ask_without_configured_key_is_server_error() {
        let gateway = Arc::new(CountingGateway::new());
        let response = app_with(gateway.clone(), config(), None)
            .oneshot(ask_request(Some(KEY), r#"{"question": "Q?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "API key not configured");
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_ask_validation_errors() {
        let gateway = Arc::new(CountingGateway::new());

        for body in [r#"{"question": "   "}"#, r#"{}"#, "not json"] {
            let response = app(gateway.clone())
                .oneshot(ask_request(Some(KEY), body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
            assert!(json_body(response).await["error"].is_string());
        }

        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_ask_judge_failure_policies() {
        let response = app(Arc::new(CountingGateway::failing_judge()))
            .oneshot(ask_request(Some(KEY), r#"{"question": "Q?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let degrade = config().with_judge_failure_policy(JudgeFailurePolicy::Degrade);
        let response = app_with(Arc::new(CountingGateway::failing_judge()), degrade, Some(KEY))
            .oneshot(ask_request(Some(KEY), r#"{"question": "Q?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["judge"]["reasoning"],
            "Judge model failed: upstream_error"
        );
    }

    #[tokio::test]
    async fn test_index_embeds_valid_csrf_token() {
        let gateway = Arc::new(CountingGateway::new());
        let router = app(gateway.clone());

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!html.contains("{{csrf_token}}"));

        let marker = "name=\"csrf_token\" value=\"";
        let start = html.find(marker).unwrap() + marker.len();
        let token = &html[start..start + html[start..].find('"').unwrap()];

        let response = router
            .oneshot(web_ask_request(format!(
                "question=What+is+quantum+computing%3F&csrf_token={}",
                token
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["response"],
            "Quantum computing uses qubits"
        );
        assert_eq!(gateway.calls(), 4);
    }

    #[tokio::test]
    async fn test_web_ask_rejects_bad_token() {
        let gateway = Arc::new(CountingGateway::new());

        let response = app(gateway.clone())
            .oneshot(web_ask_request("question=hi&csrf_token=forged.token".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(response).await["error"],
            "Invalid or expired CSRF token"
        );

        let response = app(gateway.clone())
            .oneshot(web_ask_request("question=hi".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        assert_eq!(gateway.calls(), 0);
    }
}
