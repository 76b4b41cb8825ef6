/// Read-only view of the host display's metrics, consulted once per start
/// command when the preview rectangle is resolved.
pub trait DisplayInfo: Send + Sync {
    /// Density scale factor between logical points and device pixels.
    fn density(&self) -> f32;

    /// Full display size in device pixels.
    fn full_size(&self) -> (u32, u32);
}
