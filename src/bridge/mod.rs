mod options;
#[cfg(test)]
mod tests;

pub use options::{CaptureResult, FlashModesResult, StartOptions};

use crate::error::CommandError;
use crate::session::Command;
use tokio::sync::{mpsc, oneshot};

/// Cloneable command surface onto the session controller.
///
/// Every method enqueues a command and suspends on a oneshot until the
/// controller (or a later driver event) answers it. The call boundary
/// itself never blocks the controller: validation and state mutation all
/// happen on the controller task.
#[derive(Clone, Debug)]
pub struct PreviewBridge {
    commands: mpsc::Sender<Command>,
    default_quality: u8,
}

impl PreviewBridge {
    pub(crate) fn new(commands: mpsc::Sender<Command>, default_quality: u8) -> Self {
        Self {
            commands,
            default_quality,
        }
    }

    /// Start the camera preview. Suspends across the permission
    /// round-trip and the driver's started signal.
    pub async fn start(&self, options: StartOptions) -> Result<(), CommandError> {
        let (responder, rx) = oneshot::channel();
        self.roundtrip(
            Command::Start {
                request: options.into_request(),
                responder,
            },
            rx,
        )
        .await
    }

    /// Stop the camera preview and release the device.
    pub async fn stop(&self) -> Result<(), CommandError> {
        let (responder, rx) = oneshot::channel();
        self.roundtrip(Command::Stop { responder }, rx).await
    }

    /// Capture a still picture. `quality` is a 0-100 JPEG-style scale;
    /// `None` selects the configured default. Suspends until the driver
    /// reports the picture or an error.
    pub async fn capture(&self, quality: Option<u8>) -> Result<CaptureResult, CommandError> {
        let quality = quality.unwrap_or(self.default_quality);
        let (responder, rx) = oneshot::channel();
        let value = self
            .roundtrip(Command::Capture { quality, responder }, rx)
            .await?;
        Ok(CaptureResult { value })
    }

    /// Switch between the front and back camera.
    pub async fn flip(&self) -> Result<(), CommandError> {
        let (responder, rx) = oneshot::channel();
        self.roundtrip(Command::Flip { responder }, rx).await
    }

    /// Enumerate the flash modes the running session supports, queried
    /// live from the driver.
    pub async fn get_supported_flash_modes(&self) -> Result<FlashModesResult, CommandError> {
        let (responder, rx) = oneshot::channel();
        let result = self
            .roundtrip(Command::GetSupportedFlashModes { responder }, rx)
            .await?;
        Ok(FlashModesResult { result })
    }

    /// Apply a flash mode to the running session. The mode must be one
    /// the driver currently reports as supported.
    pub async fn set_flash_mode(&self, mode: Option<String>) -> Result<(), CommandError> {
        let (responder, rx) = oneshot::channel();
        self.roundtrip(Command::SetFlashMode { mode, responder }, rx)
            .await
    }

    async fn roundtrip<T>(
        &self,
        command: Command,
        rx: oneshot::Receiver<Result<T, CommandError>>,
    ) -> Result<T, CommandError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CommandError::ControllerGone)?;
        rx.await.map_err(|_| CommandError::ControllerGone)?
    }
}
