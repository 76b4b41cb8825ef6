/// Logical length units accepted from the host caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Density-independent points, scaled by the display density
    Dip,
    /// Raw device pixels, passed through unchanged
    Px,
}

/// Convert a logical length into device pixels.
///
/// Follows the platform display subsystem's dimension formula: point values
/// multiply by the density scale factor and truncate toward zero, pixel
/// values pass through as-is.
pub fn to_pixels(value: i32, unit: Unit, density: f32) -> i32 {
    match unit {
        Unit::Dip => (value as f32 * density) as i32,
        Unit::Px => value,
    }
}
