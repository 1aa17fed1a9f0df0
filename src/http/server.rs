use crate::config::AppConfig;
use crate::error::AppError;
use crate::http::cors::cors_headers;
use crate::http::frame::{preflight_handler, process_frame_handler};
use crate::models::command::SessionSnapshot;
use crate::state::AppState;
use axum::extract::{DefaultBodyLimit, State};
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::time::Instant;

async fn health_handler() -> &'static str {
    "ok"
}

/// GET /status -- 현재 세션 스냅샷
async fn status_handler(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.lock_session()?;
    Ok(Json(session.snapshot(Instant::now(), &state.config.timing)))
}

/// POST /reset -- 세션을 초기 상태(STOPPED)로 되돌린다
async fn reset_handler(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.lock_session()?;
    session.reset();
    tracing::info!("session reset");
    Ok(Json(session.snapshot(Instant::now(), &state.config.timing)))
}

/// base64(4/3배) + JSON 여유분
fn body_limit(config: &AppConfig) -> usize {
    config.server.max_frame_bytes / 3 * 4 + 64 * 1024
}

pub fn create_router(state: AppState) -> Router {
    let limit = body_limit(&state.config);
    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/reset", post(reset_handler))
        .route(
            "/process_frame",
            post(process_frame_handler).options(preflight_handler),
        )
        .layer(DefaultBodyLimit::max(limit))
        .layer(middleware::from_fn_with_state(state.clone(), cors_headers))
        .with_state(state)
}

/// axum HTTP 서버를 시작한다. Ctrl+C 수신 시 정상 종료.
pub async fn start_http_server(state: AppState) -> Result<(), AppError> {
    let config = &state.config.server;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e: std::net::AddrParseError| AppError::HttpServer(e.to_string()))?;

    let router = create_router(state.clone());

    tracing::info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::HttpServer(e.to_string()))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::HttpServer(e.to_string()))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hand::HandDetection;
    use crate::services::frame::encode_test_png;
    use crate::services::gesture::fixtures;
    use crate::services::recognizer::StubRecognizer;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state_with(result: Result<Option<HandDetection>, String>) -> AppState {
        let recognizer = StubRecognizer { result };
        AppState::new(crate::config::test_config(), Arc::new(recognizer))
    }

    fn frame_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/process_frame")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    fn png_request() -> Request<Body> {
        frame_request(serde_json::json!({ "image": encode_test_png(8, 8) }))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body should be json")
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(state_with(Ok(None)));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_preflight_has_cors_headers() {
        let app = create_router(state_with(Ok(None)));
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/process_frame")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    }

    #[tokio::test]
    async fn test_ok_gesture_starts_recording() {
        let state = state_with(Ok(Some(fixtures::labelled("OK"))));
        let app = create_router(state.clone());

        let response = app.oneshot(png_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"status": "RECORDING", "command": "NONE", "frame": 1})
        );
        assert!(state.lock_session().unwrap().is_recording());
    }

    #[tokio::test]
    async fn test_no_hand_keeps_stopped() {
        let app = create_router(state_with(Ok(None)));
        let response = app.oneshot(png_request()).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["status"], "STOPPED");
        assert_eq!(body["command"], "NONE");
    }

    #[tokio::test]
    async fn test_throttled_frame_skips_recognizer() {
        let mut config = crate::config::test_config();
        config.timing.min_frame_interval_ms = 60_000;
        let recognizer = StubRecognizer {
            result: Ok(Some(fixtures::labelled("OK"))),
        };
        let state = AppState::new(config, Arc::new(recognizer));

        let first = create_router(state.clone()).oneshot(png_request()).await.unwrap();
        assert_eq!(json_body(first).await["status"], "RECORDING");

        // 두 번째 프레임은 인식 없이 현재 상태만 반환
        let second = create_router(state.clone()).oneshot(png_request()).await.unwrap();
        let body = json_body(second).await;
        assert_eq!(body["status"], "RECORDING");
        assert_eq!(body["frame"], 2);
    }

    #[tokio::test]
    async fn test_missing_image_is_400() {
        let app = create_router(state_with(Ok(None)));
        let response = app.oneshot(frame_request(serde_json::json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(json_body(response).await["error"], "missing image");
    }

    fn raw_frame_request(content_type: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/process_frame");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_400_with_json_error() {
        let cases = [
            ("wrong image type", Some("application/json"), r#"{"image":123}"#),
            ("truncated json", Some("application/json"), r#"{"image":"abc"#),
            ("array body", Some("application/json"), r#"["abc"]"#),
            ("no content type", None, r#"{"image":"abc"}"#),
        ];

        for (name, content_type, body) in cases {
            let app = create_router(state_with(Ok(None)));
            let response = app
                .oneshot(raw_frame_request(content_type, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{name}");
            assert_eq!(response.headers()["access-control-allow-origin"], "*", "{name}");
            let body = json_body(response).await;
            assert!(body["error"].is_string(), "{name}: {body}");
        }
    }

    #[tokio::test]
    async fn test_invalid_image_is_400() {
        let app = create_router(state_with(Ok(None)));
        let response = app
            .oneshot(frame_request(serde_json::json!({"image": "%%%not-base64%%%"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recognizer_failure_is_500() {
        let app = create_router(state_with(Err("model crashed".into())));
        let response = app.oneshot(png_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("model crashed"));
    }

    #[tokio::test]
    async fn test_status_and_reset() {
        let state = state_with(Ok(Some(fixtures::labelled("OK"))));
        create_router(state.clone()).oneshot(png_request()).await.unwrap();

        let status = create_router(state.clone())
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(status).await;
        assert_eq!(body["recording"], true);
        assert_eq!(body["frame_count"], 1);

        let reset = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reset")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(reset).await;
        assert_eq!(body["status"], "STOPPED");
        assert_eq!(body["frame_count"], 0);
    }
}
