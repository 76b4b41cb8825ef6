use crate::error::CommandError;
use std::fmt;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

/// Command categories that suspend across a driver round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallCategory {
    Start,
    Capture,
}

impl fmt::Display for CallCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallCategory::Start => write!(f, "start"),
            CallCategory::Capture => write!(f, "capture"),
        }
    }
}

/// A registered call awaiting its asynchronous outcome.
pub struct CallHandle<T> {
    id: Uuid,
    responder: oneshot::Sender<Result<T, CommandError>>,
}

impl<T> CallHandle<T> {
    pub fn new(responder: oneshot::Sender<Result<T, CommandError>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            responder,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// One pending slot for a single call category.
struct CallSlot<T> {
    pending: Option<CallHandle<T>>,
}

impl<T> Default for CallSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> CallSlot<T> {
    fn register(&mut self, category: CallCategory, handle: CallHandle<T>) -> Result<(), CommandError> {
        if self.pending.is_some() {
            return Err(CommandError::CallPending { category });
        }

        debug!("Registered {} call {}", category, handle.id);
        self.pending = Some(handle);
        Ok(())
    }

    fn complete(&mut self, category: CallCategory, outcome: Result<T, CommandError>) {
        match self.pending.take() {
            Some(handle) => {
                debug!("Completing {} call {}", category, handle.id);
                if handle.responder.send(outcome).is_err() {
                    warn!(
                        "Caller of {} call {} went away before its completion",
                        category, handle.id
                    );
                }
            }
            None => {
                // A driver event can legitimately arrive after teardown
                // already cleared the handle; drop it rather than escalate.
                warn!("Dropping {} completion with no pending call", category);
            }
        }
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Tracks the single outstanding call handle per suspended command
/// category. Start and capture calls are stored independently and never
/// share a slot.
#[derive(Default)]
pub struct CallRegistry {
    start: CallSlot<()>,
    capture: CallSlot<String>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_start(&mut self, handle: CallHandle<()>) -> Result<(), CommandError> {
        self.start.register(CallCategory::Start, handle)
    }

    pub fn start_pending(&self) -> bool {
        self.start.is_pending()
    }

    pub fn resolve_start(&mut self) {
        self.start.complete(CallCategory::Start, Ok(()));
    }

    pub fn reject_start(&mut self, reason: CommandError) {
        self.start.complete(CallCategory::Start, Err(reason));
    }

    pub fn register_capture(&mut self, handle: CallHandle<String>) -> Result<(), CommandError> {
        self.capture.register(CallCategory::Capture, handle)
    }

    pub fn capture_pending(&self) -> bool {
        self.capture.is_pending()
    }

    pub fn resolve_capture(&mut self, value: String) {
        self.capture.complete(CallCategory::Capture, Ok(value));
    }

    pub fn reject_capture(&mut self, reason: CommandError) {
        self.capture.complete(CallCategory::Capture, Err(reason));
    }

    /// Reject every still-pending call, e.g. when the controller shuts
    /// down underneath its callers.
    pub fn reject_all(&mut self, reason: CommandError) {
        if self.start.is_pending() {
            self.start.complete(CallCategory::Start, Err(reason.clone()));
        }
        if self.capture.is_pending() {
            self.capture.complete(CallCategory::Capture, Err(reason));
        }
    }
}
