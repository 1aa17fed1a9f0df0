use crate::config::TimingConfig;
use crate::models::command::{FrameResponse, MotionCommand, RecordingStatus, SessionSnapshot};
use crate::services::gesture::GestureIntent;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// 녹화 상태 전이
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Stopped,
}

/// 프레임 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub response: FrameResponse,
    pub transition: Option<Transition>,
    /// 이번 프레임에서 새로 송출된 명령
    pub emitted: Option<MotionCommand>,
}

/// 세션(녹화/명령) 상태. 프로세스에 하나만 존재하며 AppState의 Mutex 뒤에 있다.
#[derive(Debug, Default)]
pub struct SessionState {
    status: RecordingStatus,
    recording_started_at: Option<Instant>,
    recording_started_wall: Option<DateTime<Utc>>,
    last_command: MotionCommand,
    last_command_at: Option<Instant>,
    displayed_command: MotionCommand,
    displayed_command_at: Option<Instant>,
    last_status_change_at: Option<Instant>,
    last_ok_at: Option<Instant>,
    /// OK 제스처가 유지되는 동안 true. OK가 아닌 프레임에서 풀린다.
    ok_latched: bool,
    frame_count: u64,
    last_processed_at: Option<Instant>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RecordingStatus {
        self.status
    }

    pub fn is_recording(&self) -> bool {
        self.status == RecordingStatus::Recording
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// 프레임 카운터를 올리고 이번 프레임을 인식기에 보낼지 결정한다.
    /// 직전 처리 프레임과 min_frame_interval 미만 간격이면 false.
    pub fn begin_frame(&mut self, now: Instant, timing: &TimingConfig) -> bool {
        self.frame_count += 1;

        if let Some(last) = self.last_processed_at {
            if elapsed(now, last) < timing.min_frame_interval() {
                return false;
            }
        }

        self.last_processed_at = Some(now);
        true
    }

    /// 인식 결과(의도)를 반영한다.
    pub fn on_frame(
        &mut self,
        now: Instant,
        intent: GestureIntent,
        timing: &TimingConfig,
    ) -> FrameOutcome {
        let mut transition = None;
        let mut emitted = None;

        if intent == GestureIntent::Ok {
            if !self.ok_latched && self.ok_cooldown_elapsed(now, timing) {
                let t = self.toggle(now);
                if t == Transition::Stopped {
                    emitted = Some(MotionCommand::Stop);
                }
                transition = Some(t);
            }
            self.ok_latched = true;
        } else {
            self.ok_latched = false;
            if self.is_recording() {
                emitted = self.handle_motion(now, intent, timing);
            }
        }

        FrameOutcome {
            response: self.current_response(now, timing),
            transition,
            emitted,
        }
    }

    /// 현재 상태 그대로의 응답 (스킵된 프레임용)
    pub fn current_response(&self, now: Instant, timing: &TimingConfig) -> FrameResponse {
        FrameResponse {
            status: self.status,
            command: self.visible_command(now, timing),
            frame: self.frame_count,
        }
    }

    /// 표시 유지 시간 안이면 마지막 송출 명령, 지났으면 NONE
    pub fn visible_command(&self, now: Instant, timing: &TimingConfig) -> MotionCommand {
        match self.displayed_command_at {
            Some(at) if elapsed(now, at) < timing.display_hold() => self.displayed_command,
            _ => MotionCommand::None,
        }
    }

    pub fn snapshot(&self, now: Instant, timing: &TimingConfig) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            recording: self.is_recording(),
            command: self.visible_command(now, timing),
            last_command: self.last_command,
            frame_count: self.frame_count,
            recording_started_at: self.recording_started_wall,
            recording_elapsed_ms: self
                .recording_started_at
                .map(|at| millis(elapsed(now, at))),
            status_age_ms: self
                .last_status_change_at
                .map(|at| millis(elapsed(now, at))),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn ok_cooldown_elapsed(&self, now: Instant, timing: &TimingConfig) -> bool {
        self.last_ok_at
            .map_or(true, |at| elapsed(now, at) >= timing.ok_cooldown())
    }

    fn toggle(&mut self, now: Instant) -> Transition {
        self.last_ok_at = Some(now);
        self.last_status_change_at = Some(now);

        match self.status {
            RecordingStatus::Stopped => {
                self.status = RecordingStatus::Recording;
                self.recording_started_at = Some(now);
                self.recording_started_wall = Some(Utc::now());
                self.last_command = MotionCommand::None;
                self.last_command_at = None;
                self.displayed_command = MotionCommand::None;
                self.displayed_command_at = None;
                tracing::info!("recording started");
                Transition::Started
            }
            RecordingStatus::Recording => {
                let duration = self.recording_started_at.map(|at| elapsed(now, at));
                self.status = RecordingStatus::Stopped;
                self.recording_started_at = None;
                self.recording_started_wall = None;
                self.emit(MotionCommand::Stop, now);
                tracing::info!("recording stopped after {:?}", duration.unwrap_or_default());
                Transition::Stopped
            }
        }
    }

    fn handle_motion(
        &mut self,
        now: Instant,
        intent: GestureIntent,
        timing: &TimingConfig,
    ) -> Option<MotionCommand> {
        let command = match intent {
            GestureIntent::Stop => MotionCommand::Stop,
            GestureIntent::Point(cmd) => cmd,
            GestureIntent::Ok | GestureIntent::Nothing => return None,
        };

        // OK 사인을 푸는 동안의 손 모양이 명령으로 새지 않게 한다
        if let Some(started) = self.recording_started_at {
            if elapsed(now, started) < timing.warmup() {
                return None;
            }
        }

        let cooled = self
            .last_command_at
            .map_or(true, |at| elapsed(now, at) >= timing.command_cooldown());

        if command != MotionCommand::Stop && !cooled {
            tracing::debug!("command {} suppressed by cooldown", command.as_str());
            return None;
        }

        self.emit(command, now);
        Some(command)
    }

    fn emit(&mut self, command: MotionCommand, now: Instant) {
        if command != self.last_command {
            tracing::info!("command: {}", command.as_str());
        }
        self.last_command = command;
        self.last_command_at = Some(now);
        self.displayed_command = command;
        self.displayed_command_at = Some(now);
    }
}

fn elapsed(now: Instant, earlier: Instant) -> Duration {
    now.saturating_duration_since(earlier)
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
