use crate::error::AppError;
use crate::models::command::{FrameRequest, FrameResponse};
use crate::services::frame::decode_frame;
use crate::services::gesture::{self, GestureIntent};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::time::Instant;

/// POST /process_frame -- base64 프레임 → 인식 → 상태 머신 → {status, command}
pub async fn process_frame_handler(
    State(state): State<AppState>,
    request: Result<Json<FrameRequest>, JsonRejection>,
) -> Result<Json<FrameResponse>, AppError> {
    let Json(request) = request?;
    let payload = request
        .image
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("missing image".into()))?;
    let frame = decode_frame(payload, state.config.server.max_frame_bytes)?;
    let timing = &state.config.timing;

    {
        let mut session = state.lock_session()?;
        if !session.begin_frame(Instant::now(), timing) {
            tracing::trace!("frame {} throttled", session.frame_count());
            return Ok(Json(session.current_response(Instant::now(), timing)));
        }
    }

    let detection = state.recognizer.recognize(&frame).await?;
    let intent = match &detection {
        Some(hand) => gesture::classify(
            hand,
            &state.config.gesture,
            state.config.recognizer.min_confidence,
        ),
        None => GestureIntent::Nothing,
    };

    let mut session = state.lock_session()?;
    let outcome = session.on_frame(Instant::now(), intent, timing);

    tracing::debug!(
        "frame {} {}x{}: gesture={:?} intent={:?} -> {:?}",
        outcome.response.frame,
        frame.width,
        frame.height,
        detection.as_ref().map(|h| h.gesture.as_str()),
        intent,
        outcome.response.command,
    );

    Ok(Json(outcome.response))
}

/// OPTIONS /process_frame -- CORS preflight. 헤더는 cors 미들웨어가 붙인다.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}
