//! Mock platform collaborators for testing without real camera hardware.

use crate::error::DriverError;
use crate::events::DriverEvent;
use crate::geometry::PreviewRect;
use crate::platform::{
    Background, CameraDriver, DisplayInfo, DriverEventSender, Facing, PermissionGate,
    PermissionState, ViewContainer,
};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Shared, inspectable state behind a [`MockCameraDriver`].
#[derive(Debug, Default)]
pub struct MockDriverState {
    pub open_calls: u32,
    pub close_calls: u32,
    pub switch_calls: u32,
    pub captures: Vec<(i32, i32, u8)>,
    pub applied_flash_modes: Vec<String>,
    pub flash_modes: Vec<String>,
    pub last_facing: Option<Facing>,
    pub last_rect: Option<PreviewRect>,
    /// Event sender captured from the most recent `open`, so tests can
    /// emit driver events by hand.
    pub events: Option<DriverEventSender>,
}

/// Mock camera driver that records every call it receives.
///
/// By default it behaves like a healthy device: `open` emits `Started`
/// immediately and `take_picture` emits `PictureReady`. `manual_events`
/// turns the automatic events off so a test can drive completions itself
/// through the sender captured in [`MockDriverState`].
pub struct MockCameraDriver {
    state: Arc<Mutex<MockDriverState>>,
    picture: String,
    auto_start: bool,
    auto_capture: bool,
    open_error: Option<String>,
    start_error: Option<String>,
    capture_error: Option<String>,
    switch_fails: bool,
}

impl MockCameraDriver {
    pub fn new() -> Self {
        let state = MockDriverState {
            flash_modes: vec!["off".to_string(), "on".to_string(), "auto".to_string()],
            ..Default::default()
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            picture: "mock-picture".to_string(),
            auto_start: true,
            auto_capture: true,
            open_error: None,
            start_error: None,
            capture_error: None,
            switch_fails: false,
        }
    }

    /// Replace the flash modes the driver reports.
    pub fn with_flash_modes(self, modes: &[&str]) -> Self {
        self.state.lock().unwrap().flash_modes = modes.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Replace the encoded picture reference `take_picture` produces.
    pub fn with_picture(mut self, picture: &str) -> Self {
        self.picture = picture.to_string();
        self
    }

    /// Disable automatic `Started` and `PictureReady` events; the test
    /// emits driver events itself.
    pub fn manual_events(mut self) -> Self {
        self.auto_start = false;
        self.auto_capture = false;
        self
    }

    /// Make `open` itself return an error.
    pub fn failing_open(mut self, message: &str) -> Self {
        self.open_error = Some(message.to_string());
        self
    }

    /// Make `open` succeed but emit `StartFailed` instead of `Started`.
    pub fn failing_start(mut self, message: &str) -> Self {
        self.start_error = Some(message.to_string());
        self
    }

    /// Make `take_picture` emit `PictureError` instead of `PictureReady`.
    pub fn failing_capture(mut self, message: &str) -> Self {
        self.capture_error = Some(message.to_string());
        self
    }

    /// Make `switch_facing` return an error.
    pub fn failing_switch(mut self) -> Self {
        self.switch_fails = true;
        self
    }

    /// Handle onto the recorded state for assertions.
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }
}

impl Default for MockCameraDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDriver for MockCameraDriver {
    fn open(
        &mut self,
        facing: Facing,
        rect: PreviewRect,
        events: DriverEventSender,
    ) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        state.open_calls += 1;
        state.last_facing = Some(facing);
        state.last_rect = Some(rect);
        state.events = Some(events.clone());

        if let Some(message) = &self.open_error {
            return Err(DriverError::new(message.clone()));
        }

        if let Some(message) = &self.start_error {
            let _ = events.try_send(DriverEvent::StartFailed {
                message: message.clone(),
            });
        } else if self.auto_start {
            let _ = events.try_send(DriverEvent::Started);
        }

        Ok(())
    }

    fn switch_facing(&mut self) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        state.switch_calls += 1;

        if self.switch_fails {
            return Err(DriverError::new("switch failed"));
        }

        Ok(())
    }

    fn take_picture(&mut self, x: i32, y: i32, quality: u8) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        state.captures.push((x, y, quality));

        if !self.auto_capture {
            return Ok(());
        }

        let events = state
            .events
            .clone()
            .ok_or_else(|| DriverError::new("no open session"))?;

        let event = match &self.capture_error {
            Some(message) => DriverEvent::PictureError {
                message: message.clone(),
            },
            None => DriverEvent::PictureReady {
                value: self.picture.clone(),
            },
        };
        let _ = events.try_send(event);

        Ok(())
    }

    fn supported_flash_modes(&self) -> Result<Vec<String>, DriverError> {
        Ok(self.state.lock().unwrap().flash_modes.clone())
    }

    fn apply_flash_mode(&mut self, mode: &str) -> Result<(), DriverError> {
        self.state
            .lock()
            .unwrap()
            .applied_flash_modes
            .push(mode.to_string());
        Ok(())
    }

    fn close(&mut self) {
        debug!("Mock camera driver closed");
        self.state.lock().unwrap().close_calls += 1;
    }
}

/// Mock permission gate with a fixed query answer and a fixed prompt answer.
pub struct MockPermissionGate {
    initial: PermissionState,
    on_request: PermissionState,
    requests: Arc<Mutex<u32>>,
}

impl MockPermissionGate {
    /// Permission already granted; `request` is never needed.
    pub fn granted() -> Self {
        Self {
            initial: PermissionState::Granted,
            on_request: PermissionState::Granted,
            requests: Arc::new(Mutex::new(0)),
        }
    }

    /// Permission denied, and the prompt denies again.
    pub fn denied() -> Self {
        Self {
            initial: PermissionState::Denied,
            on_request: PermissionState::Denied,
            requests: Arc::new(Mutex::new(0)),
        }
    }

    /// Undecided permission; the prompt answers with `outcome`.
    pub fn prompt_then(outcome: PermissionState) -> Self {
        Self {
            initial: PermissionState::Prompt,
            on_request: outcome,
            requests: Arc::new(Mutex::new(0)),
        }
    }

    /// How many times the user was prompted.
    pub fn request_count(&self) -> u32 {
        *self.requests.lock().unwrap()
    }

    /// Shared counter handle, for tests that hand the gate away.
    pub fn requests(&self) -> Arc<Mutex<u32>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait::async_trait]
impl PermissionGate for MockPermissionGate {
    fn query_state(&self) -> PermissionState {
        self.initial
    }

    async fn request(&self) -> PermissionState {
        *self.requests.lock().unwrap() += 1;
        debug!("Mock permission prompt answered: {:?}", self.on_request);
        self.on_request
    }
}

/// Mock display with a fixed density and size.
#[derive(Debug, Clone, Copy)]
pub struct MockDisplayInfo {
    density: f32,
    size: (u32, u32),
}

impl MockDisplayInfo {
    pub fn new(density: f32, size: (u32, u32)) -> Self {
        Self { density, size }
    }
}

impl Default for MockDisplayInfo {
    fn default() -> Self {
        Self::new(2.0, (1080, 1920))
    }
}

impl DisplayInfo for MockDisplayInfo {
    fn density(&self) -> f32 {
        self.density
    }

    fn full_size(&self) -> (u32, u32) {
        self.size
    }
}

/// Shared, inspectable state behind a [`MockViewContainer`].
#[derive(Debug)]
pub struct MockViewState {
    pub attached: Option<PreviewRect>,
    pub attach_calls: u32,
    pub detach_calls: u32,
    pub background: Background,
    pub host_raised: u32,
}

impl Default for MockViewState {
    fn default() -> Self {
        Self {
            attached: None,
            attach_calls: 0,
            detach_calls: 0,
            background: Background::Opaque,
            host_raised: 0,
        }
    }
}

/// Mock host view hierarchy that records attach/detach traffic.
#[derive(Default)]
pub struct MockViewContainer {
    state: Arc<Mutex<MockViewState>>,
}

impl MockViewContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the recorded state for assertions.
    pub fn state(&self) -> Arc<Mutex<MockViewState>> {
        Arc::clone(&self.state)
    }
}

impl ViewContainer for MockViewContainer {
    fn attach(&mut self, rect: PreviewRect) {
        let mut state = self.state.lock().unwrap();
        state.attached = Some(rect);
        state.attach_calls += 1;
    }

    fn detach(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.attached = None;
        state.detach_calls += 1;
    }

    fn set_background(&mut self, background: Background) {
        self.state.lock().unwrap().background = background;
    }

    fn bring_host_to_front(&mut self) {
        self.state.lock().unwrap().host_raised += 1;
    }
}
