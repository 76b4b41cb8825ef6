pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod platform;
pub mod session;

pub use bridge::{CaptureResult, FlashModesResult, PreviewBridge, StartOptions};
pub use config::CamlinkConfig;
pub use error::{CamlinkError, CommandError, DriverError, Result};
pub use events::DriverEvent;
pub use geometry::{PlacementRequest, PreviewRect, Unit};
pub use platform::{
    Background, CameraDriver, DisplayInfo, DriverEventSender, Facing, PermissionGate,
    PermissionState, ViewContainer,
};
pub use session::{
    CallCategory, ControllerHandle, Session, SessionControllerBuilder, SessionState, StartRequest,
};
