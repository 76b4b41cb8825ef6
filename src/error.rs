use crate::session::CallCategory;
use thiserror::Error;

/// Rejection reasons delivered to a caller through the call-resolution
/// channel. Each command terminates with at most one of these; nothing is
/// retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("permission is required to start the camera")]
    PermissionDenied,

    #[error("camera already started")]
    AlreadyStarted,

    #[error("camera already stopped")]
    AlreadyStopped,

    #[error("Camera is not running")]
    NotRunning,

    #[error("{category} call already pending")]
    CallPending { category: CallCategory },

    #[error("{name} required parameter is missing")]
    MissingParameter { name: String },

    #[error("Flash mode not recognised: {mode}")]
    UnsupportedFlashMode { mode: String },

    #[error("failed to flip camera")]
    FlipFailed,

    #[error("{message}")]
    Driver { message: String },

    #[error("camera controller is not available")]
    ControllerGone,
}

impl CommandError {
    pub fn driver<S: Into<String>>(message: S) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    pub fn missing_parameter<S: Into<String>>(name: S) -> Self {
        Self::MissingParameter { name: name.into() }
    }
}

/// Opaque failure reported by a camera driver call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DriverError {
    pub message: String,
}

impl DriverError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<DriverError> for CommandError {
    fn from(error: DriverError) -> Self {
        CommandError::Driver {
            message: error.message,
        }
    }
}

#[derive(Error, Debug)]
pub enum CamlinkError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("System error: {message}")]
    System { message: String },
}

impl CamlinkError {
    pub fn system<S: Into<String>>(message: S) -> Self {
        Self::System {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CamlinkError>;
