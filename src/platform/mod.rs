mod display;
mod driver;
pub mod mock;
mod permission;
mod view;

pub use display::DisplayInfo;
pub use driver::{CameraDriver, DriverEventSender, Facing};
pub use permission::{PermissionGate, PermissionState};
pub use view::{Background, ViewContainer};
