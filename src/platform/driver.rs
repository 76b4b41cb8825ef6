use crate::error::DriverError;
use crate::events::DriverEvent;
use crate::geometry::PreviewRect;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Which physical camera a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Front,
    Back,
}

impl Facing {
    /// Parse the wire `position` parameter.
    ///
    /// An absent, empty or `"rear"` position selects the back camera; any
    /// other value selects the front camera.
    pub fn from_position(position: Option<&str>) -> Self {
        match position {
            None | Some("") | Some("rear") => Facing::Back,
            Some(_) => Facing::Front,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }
}

/// Sender half drivers use to deliver completion events into the session
/// controller.
pub type DriverEventSender = mpsc::Sender<DriverEvent>;

/// Narrow capability interface onto the platform camera implementation.
///
/// `open` and `take_picture` only dispatch the operation; their outcomes
/// arrive later as [`DriverEvent`]s on the sender handed to `open`. The
/// remaining calls complete inline against the open session.
pub trait CameraDriver: Send {
    /// Begin opening a preview session for the given camera at the given
    /// pixel rectangle. Completion arrives as `Started` or `StartFailed`.
    fn open(
        &mut self,
        facing: Facing,
        rect: PreviewRect,
        events: DriverEventSender,
    ) -> Result<(), DriverError>;

    /// Switch the open session between the front and back camera.
    fn switch_facing(&mut self) -> Result<(), DriverError>;

    /// Request a still capture. The position hint (0, 0) lets the driver
    /// choose its focus and crop defaults. Completion arrives as
    /// `PictureReady` or `PictureError`.
    fn take_picture(&mut self, x: i32, y: i32, quality: u8) -> Result<(), DriverError>;

    /// Enumerate the flash modes the open session currently supports, in
    /// driver order. Never cached by callers.
    fn supported_flash_modes(&self) -> Result<Vec<String>, DriverError>;

    /// Apply a flash mode to the open session.
    fn apply_flash_mode(&mut self, mode: &str) -> Result<(), DriverError>;

    /// Tear down the open session and release the device.
    fn close(&mut self);
}
