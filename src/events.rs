use serde::{Deserialize, Serialize};

/// Completion events a camera driver delivers back into the session
/// controller. Drivers emit these from their own callback context; the
/// controller consumes them on its owning task, so no driver thread ever
/// touches session state directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DriverEvent {
    /// The preview session opened and frames are flowing
    Started,
    /// The preview session failed to open
    StartFailed { message: String },
    /// A capture completed; carries the encoded picture reference
    PictureReady { value: String },
    /// A capture failed
    PictureError { message: String },
    /// Tap-to-focus settled at the given preview coordinates
    FocusSet { x: i32, y: i32 },
    /// Tap-to-focus failed
    FocusError { message: String },
}

impl DriverEvent {
    /// Get the event type as a string for filtering and logging
    pub fn event_type(&self) -> &'static str {
        match self {
            DriverEvent::Started => "started",
            DriverEvent::StartFailed { .. } => "start_failed",
            DriverEvent::PictureReady { .. } => "picture_ready",
            DriverEvent::PictureError { .. } => "picture_error",
            DriverEvent::FocusSet { .. } => "focus_set",
            DriverEvent::FocusError { .. } => "focus_error",
        }
    }

    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            DriverEvent::Started => "Camera started".to_string(),
            DriverEvent::StartFailed { message } => {
                format!("Camera failed to start: {}", message)
            }
            DriverEvent::PictureReady { value } => {
                format!("Picture ready ({} bytes)", value.len())
            }
            DriverEvent::PictureError { message } => {
                format!("Picture failed: {}", message)
            }
            DriverEvent::FocusSet { x, y } => {
                format!("Focus set at ({}, {})", x, y)
            }
            DriverEvent::FocusError { message } => {
                format!("Focus failed: {}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        assert_eq!(DriverEvent::Started.event_type(), "started");
        assert_eq!(
            DriverEvent::PictureReady {
                value: "abc".to_string()
            }
            .event_type(),
            "picture_ready"
        );
        assert_eq!(
            DriverEvent::FocusSet { x: 1, y: 2 }.event_type(),
            "focus_set"
        );
    }

    #[test]
    fn test_event_descriptions() {
        let event = DriverEvent::StartFailed {
            message: "device busy".to_string(),
        };
        assert_eq!(event.description(), "Camera failed to start: device busy");

        let event = DriverEvent::FocusSet { x: 120, y: 340 };
        assert_eq!(event.description(), "Focus set at (120, 340)");
    }
}
