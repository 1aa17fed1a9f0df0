use crate::config::AppConfig;
use crate::error::AppError;
use crate::services::recognizer::GestureRecognizer;
use crate::services::session::SessionState;
use std::sync::{Arc, Mutex, MutexGuard};

/// 앱 전역 공유 상태. axum 라우터에서 사용한다.
/// 세션 락은 await 지점을 넘겨 들고 있으면 안 된다.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: Arc<Mutex<SessionState>>,
    pub recognizer: Arc<dyn GestureRecognizer>,
}

impl AppState {
    pub fn new(config: AppConfig, recognizer: Arc<dyn GestureRecognizer>) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(SessionState::new())),
            recognizer,
        }
    }

    pub fn lock_session(&self) -> Result<MutexGuard<'_, SessionState>, AppError> {
        self.session
            .lock()
            .map_err(|e| AppError::LockPoisoned(e.to_string()))
    }
}
