use crate::geometry::PlacementRequest;
use crate::platform::Facing;
use crate::session::StartRequest;
use serde::{Deserialize, Serialize};

/// Wire-level parameters of the start command.
///
/// Field names and defaults mirror the host protocol: lengths are in
/// density-independent units, `position` selects the camera ("rear" by
/// default) and `to_back` stacks the preview behind the host UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartOptions {
    pub position: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub padding_bottom: i32,
    pub to_back: bool,
}

impl StartOptions {
    /// Decode into a validated start request: parse the camera position
    /// and clamp every length to zero-or-positive.
    pub fn into_request(self) -> StartRequest {
        StartRequest {
            facing: Facing::from_position(self.position.as_deref()),
            placement: PlacementRequest {
                x: self.x.max(0),
                y: self.y.max(0),
                width: self.width.max(0),
                height: self.height.max(0),
                padding_bottom: self.padding_bottom.max(0),
            },
            to_back: self.to_back,
        }
    }
}

/// Success payload of the capture command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptureResult {
    /// Encoded picture reference handed back by the driver
    pub value: String,
}

/// Success payload of the flash-mode query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashModesResult {
    /// Supported mode names in driver order
    pub result: Vec<String>,
}
