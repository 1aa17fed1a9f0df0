use serde::{Deserialize, Serialize};

/// 차량에 전달되는 이산 주행 명령
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MotionCommand {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
    #[default]
    None,
}

impl MotionCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "FORWARD",
            Self::Backward => "BACKWARD",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Stop => "STOP",
            Self::None => "NONE",
        }
    }
}

/// 녹화(명령 송출) 상태. OK 제스처로 토글된다.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordingStatus {
    Recording,
    #[default]
    Stopped,
}

/// POST /process_frame 요청 바디
#[derive(Debug, Clone, Deserialize)]
pub struct FrameRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// POST /process_frame 응답 바디
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameResponse {
    pub status: RecordingStatus,
    pub command: MotionCommand,
    pub frame: u64,
}

/// GET /status 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: RecordingStatus,
    pub recording: bool,
    pub command: MotionCommand,
    pub last_command: MotionCommand,
    pub frame_count: u64,
    pub recording_started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub recording_elapsed_ms: Option<u64>,
    /// 현재 상태 라벨이 표시된 지 경과한 시간
    pub status_age_ms: Option<u64>,
}
