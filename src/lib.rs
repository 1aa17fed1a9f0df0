pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, RecognizerError};
pub use state::AppState;

use services::recognizer::{GestureRecognizer, RemoteRecognizer};
use std::sync::Arc;

/// 인식기 클라이언트를 만들고 HTTP 서버를 실행한다. 서버가 종료될 때까지 반환하지 않는다.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let recognizer = RemoteRecognizer::new(&config.recognizer)?;
    tracing::info!("gesture recognizer endpoint: {}", recognizer.name());

    let state = AppState::new(config, Arc::new(recognizer));
    http::server::start_http_server(state).await
}
