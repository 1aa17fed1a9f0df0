use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// config.toml 파싱/검증 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config validation error: {field} - {reason}")]
    Validation { field: String, reason: String },
}

/// 외부 제스처 인식 모델 호출 에러
#[derive(Debug, thiserror::Error)]
pub enum RecognizerError {
    #[error("recognizer network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("recognizer returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("recognizer response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 앱 전역 에러 타입. 모든 모듈에서 공유.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config load failed: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    BadRequest(String),

    #[error("gesture recognition failed: {0}")]
    Recognizer(#[from] RecognizerError),

    #[error("session lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("http server error: {0}")]
    HttpServer(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 잘못된 JSON 바디(타입 불일치, content-type 누락, 문법 오류)는 모두 400
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// HTTP 에러 응답: `{"error": "<message>"}`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::warn!("bad request: {self}");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
