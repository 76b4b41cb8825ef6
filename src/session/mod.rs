mod controller;
mod registry;
mod state;

pub use controller::{Command, ControllerHandle, SessionController, SessionControllerBuilder};
pub use registry::{CallCategory, CallHandle, CallRegistry};
pub use state::{Session, SessionState, StartPhase, StartRequest};
