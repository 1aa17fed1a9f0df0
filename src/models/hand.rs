use serde::{Deserialize, Serialize};

/// MediaPipe 손 토폴로지의 랜드마크 개수
pub const LANDMARK_COUNT: usize = 21;

/// 손 랜드마크 인덱스 (MediaPipe hand topology)
pub mod idx {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

/// 정규화 이미지 좌표. x는 오른쪽, y는 아래쪽으로 증가.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// 2D 거리 (z 무시)
    pub fn distance(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// 인식 모델이 반환한 손 하나
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandDetection {
    pub gesture: String,
    pub score: f32,
    #[serde(default)]
    pub handedness: Option<String>,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl HandDetection {
    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    pub fn has_full_landmarks(&self) -> bool {
        self.landmarks.len() == LANDMARK_COUNT
    }
}
