use crate::geometry::{PlacementRequest, PreviewRect};
use crate::platform::Facing;

/// Decoded, validated input of a start command: the camera to use, where
/// to place the preview (logical units, clamped to zero-or-positive) and
/// whether it renders behind the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartRequest {
    pub facing: Facing,
    pub placement: PlacementRequest,
    pub to_back: bool,
}

/// The single active camera preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub facing: Facing,
    pub rect: PreviewRect,
    pub to_back: bool,
}

/// Phase of a start command still in flight.
#[derive(Debug)]
pub enum StartPhase {
    /// Suspended across the permission gate's prompt
    Permission { request: StartRequest },
    /// Driver open dispatched; waiting on its started event
    Opening { session: Session },
}

/// Lifecycle of the camera session.
///
/// A session exists if and only if the state is `Running`: created only by
/// a successfully completed start, destroyed only by stop. The controller
/// task is the exclusive owner of this value, so at most one session
/// exists system-wide.
#[derive(Debug)]
pub enum SessionState {
    Stopped,
    Starting(StartPhase),
    Running(Session),
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Running(session) => Some(session),
            _ => None,
        }
    }

    /// State name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Stopped => "stopped",
            SessionState::Starting(_) => "starting",
            SessionState::Running(_) => "running",
        }
    }
}
