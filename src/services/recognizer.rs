use crate::config::RecognizerConfig;
use crate::error::RecognizerError;
use crate::models::hand::HandDetection;
use crate::services::frame::Frame;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 외부 제스처 인식 모델 인터페이스
#[async_trait::async_trait]
pub trait GestureRecognizer: Send + Sync {
    /// 프레임에서 가장 확실한 손 하나를 찾는다. 손이 없으면 None.
    async fn recognize(&self, frame: &Frame) -> Result<Option<HandDetection>, RecognizerError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    image: String,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    hands: Vec<HandDetection>,
}

/// HTTP로 노출된 인식 모델 사이드카를 호출한다.
/// 요청: `{image, width, height}` → 응답: `{hands: [HandDetection]}`
pub struct RemoteRecognizer {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteRecognizer {
    pub fn new(config: &RecognizerConfig) -> Result<Self, RecognizerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait::async_trait]
impl GestureRecognizer for RemoteRecognizer {
    async fn recognize(&self, frame: &Frame) -> Result<Option<HandDetection>, RecognizerError> {
        let request = RecognizeRequest {
            image: frame.to_base64(),
            width: frame.width,
            height: frame.height,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecognizerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let parsed: RecognizeResponse = serde_json::from_slice(&body)?;
        Ok(pick_best(parsed.hands))
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}

/// 랜드마크가 온전한 손 중 점수가 가장 높은 것
pub fn pick_best(hands: Vec<HandDetection>) -> Option<HandDetection> {
    hands
        .into_iter()
        .filter(|hand| {
            let ok = hand.has_full_landmarks();
            if !ok {
                tracing::warn!(
                    "dropping hand with {} landmarks (gesture={})",
                    hand.landmarks.len(),
                    hand.gesture
                );
            }
            ok
        })
        .max_by(|a, b| a.score.total_cmp(&b.score))
}

/// 고정 결과를 돌려주는 인식기 (테스트용)
#[cfg(test)]
pub(crate) struct StubRecognizer {
    pub result: Result<Option<HandDetection>, String>,
}

#[cfg(test)]
#[async_trait::async_trait]
impl GestureRecognizer for StubRecognizer {
    async fn recognize(&self, _frame: &Frame) -> Result<Option<HandDetection>, RecognizerError> {
        self.result.clone().map_err(|body| RecognizerError::Api { status: 500, body })
    }

    fn name(&self) -> &str {
        "stub"
    }
}
