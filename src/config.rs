use crate::error::{AppError, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub recognizer: RecognizerConfig,
    pub timing: TimingConfig,
    pub gesture: GestureConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_frame_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecognizerConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub min_confidence: f32,
}

/// 세션 상태 머신의 쿨다운/유지 시간 (모두 밀리초)
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub ok_cooldown_ms: u64,
    pub command_cooldown_ms: u64,
    pub display_hold_ms: u64,
    pub warmup_ms: u64,
    pub min_frame_interval_ms: u64,
}

impl TimingConfig {
    pub fn ok_cooldown(&self) -> Duration {
        Duration::from_millis(self.ok_cooldown_ms)
    }

    pub fn command_cooldown(&self) -> Duration {
        Duration::from_millis(self.command_cooldown_ms)
    }

    pub fn display_hold(&self) -> Duration {
        Duration::from_millis(self.display_hold_ms)
    }

    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.warmup_ms)
    }

    pub fn min_frame_interval(&self) -> Duration {
        Duration::from_millis(self.min_frame_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GestureConfig {
    pub ok_labels: Vec<String>,
    pub stop_labels: Vec<String>,
    pub point_labels: Vec<String>,
    /// 엄지-검지 끝 거리 / 손 크기(손목-중지 MCP) 비율 상한
    pub ok_touch_ratio: f32,
    /// 손목→검지 끝 벡터의 최소 길이 (정규화 좌표)
    pub min_pointer_length: f32,
}

impl AppConfig {
    /// config.toml 파일에서 설정을 로드한다.
    /// 파일이 없거나 파싱 실패 시 에러를 반환한다 (기본값 폴백 없음).
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::NotFound {
            path: path.display().to_string(),
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// 설정값 검증. 잘못된 값이 있으면 에러 반환.
    fn validate(&self) -> Result<(), AppError> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "port must be > 0"));
        }

        if self.server.max_frame_bytes == 0 {
            return Err(invalid("server.max_frame_bytes", "must be > 0"));
        }

        if axum::http::HeaderValue::from_str(&self.cors.allow_origin).is_err() {
            return Err(invalid("cors.allow_origin", "not a valid header value"));
        }

        if self.recognizer.endpoint.trim().is_empty() {
            return Err(invalid("recognizer.endpoint", "must not be empty"));
        }

        if !(0.0..=1.0).contains(&self.recognizer.min_confidence) {
            return Err(invalid(
                "recognizer.min_confidence",
                "must be within 0.0..=1.0",
            ));
        }

        if self.gesture.ok_touch_ratio <= 0.0 {
            return Err(invalid("gesture.ok_touch_ratio", "must be > 0"));
        }

        if self.gesture.min_pointer_length < 0.0 {
            return Err(invalid("gesture.min_pointer_length", "must be >= 0"));
        }

        if self.gesture.point_labels.is_empty() {
            return Err(invalid("gesture.point_labels", "at least one label required"));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> AppError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    toml::from_str(include_str!("../config.toml")).expect("bundled config.toml should parse")
}
