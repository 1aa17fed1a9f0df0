use crate::config::GestureConfig;
use crate::models::command::MotionCommand;
use crate::models::hand::{idx, HandDetection, Landmark};
use crate::services::direction;

/// 프레임 하나에서 해석된 손 제스처의 의도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIntent {
    /// 녹화 토글
    Ok,
    Stop,
    Point(MotionCommand),
    Nothing,
}

/// 인식 결과를 의도로 분류한다.
/// 신뢰도가 min_confidence 미만이면 Nothing.
pub fn classify(hand: &HandDetection, config: &GestureConfig, min_confidence: f32) -> GestureIntent {
    if hand.score < min_confidence {
        return GestureIntent::Nothing;
    }

    let label = normalize_label(&hand.gesture);

    if matches_any(&label, &config.ok_labels) || is_ok_pose(hand, config.ok_touch_ratio) {
        return GestureIntent::Ok;
    }

    if matches_any(&label, &config.stop_labels) {
        return GestureIntent::Stop;
    }

    if matches_any(&label, &config.point_labels) {
        return match direction::direction_from_landmarks(hand, config.min_pointer_length) {
            Some(cmd) => GestureIntent::Point(cmd),
            None => GestureIntent::Nothing,
        };
    }

    GestureIntent::Nothing
}

/// 랜드마크 기하로 OK 사인 판정:
/// 엄지 끝과 검지 끝이 맞닿고 중지/약지/새끼는 펴져 있어야 한다.
pub fn is_ok_pose(hand: &HandDetection, touch_ratio: f32) -> bool {
    if !hand.has_full_landmarks() {
        return false;
    }
    let lm = &hand.landmarks;
    let wrist = &lm[idx::WRIST];

    let scale = wrist.distance(&lm[idx::MIDDLE_MCP]);
    if scale <= f32::EPSILON {
        return false;
    }

    let touching = lm[idx::THUMB_TIP].distance(&lm[idx::INDEX_TIP]) < touch_ratio * scale;

    touching
        && is_extended(wrist, &lm[idx::MIDDLE_TIP], &lm[idx::MIDDLE_PIP])
        && is_extended(wrist, &lm[idx::RING_TIP], &lm[idx::RING_PIP])
        && is_extended(wrist, &lm[idx::PINKY_TIP], &lm[idx::PINKY_PIP])
}

fn is_extended(wrist: &Landmark, tip: &Landmark, pip: &Landmark) -> bool {
    wrist.distance(tip) > wrist.distance(pip)
}

/// "Closed_Fist", "closed-fist", "Closed Fist" 를 같은 라벨로 취급
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn matches_any(normalized: &str, labels: &[String]) -> bool {
    labels.iter().any(|l| normalize_label(l) == normalized)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::hand::{idx, HandDetection, Landmark};

    /// 손목 (0.5, 0.9), 손가락이 위로 향한 기본 손. 모든 손가락이 굽혀진 상태.
    fn base_landmarks() -> Vec<Landmark> {
        let mut lm = vec![Landmark::new(0.5, 0.8); 21];
        lm[idx::WRIST] = Landmark::new(0.5, 0.9);
        lm[idx::MIDDLE_MCP] = Landmark::new(0.5, 0.7);
        // 굽힌 손가락: 끝이 PIP보다 손목에 가깝다
        lm[idx::MIDDLE_PIP] = Landmark::new(0.5, 0.62);
        lm[idx::MIDDLE_TIP] = Landmark::new(0.5, 0.72);
        lm[idx::RING_PIP] = Landmark::new(0.55, 0.63);
        lm[idx::RING_TIP] = Landmark::new(0.55, 0.73);
        lm[idx::PINKY_PIP] = Landmark::new(0.6, 0.66);
        lm[idx::PINKY_TIP] = Landmark::new(0.6, 0.75);
        lm[idx::THUMB_TIP] = Landmark::new(0.33, 0.75);
        lm[idx::INDEX_TIP] = Landmark::new(0.45, 0.72);
        lm
    }

    pub fn hand(gesture: &str, score: f32, landmarks: Vec<Landmark>) -> HandDetection {
        HandDetection {
            gesture: gesture.into(),
            score,
            handedness: Some("Right".into()),
            landmarks,
        }
    }

    /// 검지로 (tip_x, tip_y) 방향을 가리키는 손
    pub fn pointing(tip_x: f32, tip_y: f32) -> HandDetection {
        let mut lm = base_landmarks();
        lm[idx::INDEX_TIP] = Landmark::new(tip_x, tip_y);
        hand("Pointing_Up", 0.9, lm)
    }

    /// 라벨 없이 기하만으로 판정되는 OK 사인
    pub fn ok_pose() -> HandDetection {
        let mut lm = base_landmarks();
        lm[idx::THUMB_TIP] = Landmark::new(0.44, 0.6);
        lm[idx::INDEX_TIP] = Landmark::new(0.45, 0.61);
        lm[idx::MIDDLE_TIP] = Landmark::new(0.5, 0.45);
        lm[idx::RING_TIP] = Landmark::new(0.56, 0.48);
        lm[idx::PINKY_TIP] = Landmark::new(0.62, 0.52);
        hand("None", 0.8, lm)
    }

    pub fn labelled(gesture: &str) -> HandDetection {
        hand(gesture, 0.9, base_landmarks())
    }
}
