use super::converter::{to_pixels, Unit};
use serde::{Deserialize, Serialize};

/// Caller-supplied preview placement in density-independent units.
///
/// Resolved once per start command and discarded. A zero width or height
/// means "use the full display dimension".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementRequest {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub padding_bottom: i32,
}

/// Final placement of the preview surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Resolve a placement request against the current display.
///
/// Offsets and explicit dimensions convert from points to pixels; an
/// unspecified (zero) width or height substitutes the full display
/// dimension, which is already in pixels. Bottom padding is subtracted
/// from the resolved height only.
pub fn resolve(request: PlacementRequest, density: f32, full_size: (u32, u32)) -> PreviewRect {
    let x = to_pixels(request.x, Unit::Dip, density);
    let y = to_pixels(request.y, Unit::Dip, density);

    let padding_bottom = if request.padding_bottom != 0 {
        to_pixels(request.padding_bottom, Unit::Dip, density)
    } else {
        0
    };

    let width = if request.width != 0 {
        to_pixels(request.width, Unit::Dip, density)
    } else {
        to_pixels(full_size.0 as i32, Unit::Px, density)
    };

    let height = if request.height != 0 {
        to_pixels(request.height, Unit::Dip, density) - padding_bottom
    } else {
        to_pixels(full_size.1 as i32, Unit::Px, density) - padding_bottom
    };

    PreviewRect {
        x,
        y,
        width,
        height,
    }
}
