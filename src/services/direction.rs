use crate::models::command::MotionCommand;
use crate::models::hand::{idx, HandDetection, Landmark};

/// from → to 벡터의 각도 (도, -180..=180).
/// 이미지 y축은 아래로 증가하므로 뒤집어서 "위"가 +90°가 되게 한다.
pub fn pointing_angle(from: &Landmark, to: &Landmark) -> f32 {
    let dx = to.x - from.x;
    let dy = -(to.y - from.y);
    dy.atan2(dx).to_degrees()
}

/// 각도를 4방향 명령으로 버킷팅한다. 경계값은 반시계 방향 버킷에 속한다.
pub fn classify_angle(degrees: f32) -> MotionCommand {
    if (-45.0..45.0).contains(&degrees) {
        MotionCommand::Right
    } else if (45.0..135.0).contains(&degrees) {
        MotionCommand::Forward
    } else if (-135.0..-45.0).contains(&degrees) {
        MotionCommand::Backward
    } else {
        MotionCommand::Left
    }
}

/// 손목(0) → 검지 끝(8) 방향으로 명령을 결정한다.
/// 벡터가 min_length보다 짧거나 랜드마크가 없으면 None.
pub fn direction_from_landmarks(hand: &HandDetection, min_length: f32) -> Option<MotionCommand> {
    let wrist = hand.landmark(idx::WRIST)?;
    let tip = hand.landmark(idx::INDEX_TIP)?;

    if wrist.distance(tip) < min_length {
        return None;
    }

    Some(classify_angle(pointing_angle(wrist, tip)))
}
