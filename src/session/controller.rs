use crate::bridge::PreviewBridge;
use crate::config::CamlinkConfig;
use crate::error::{CamlinkError, CommandError, Result};
use crate::events::DriverEvent;
use crate::geometry;
use crate::platform::{
    Background, CameraDriver, DisplayInfo, PermissionGate, PermissionState, ViewContainer,
};
use crate::session::registry::{CallCategory, CallHandle, CallRegistry};
use crate::session::state::{Session, SessionState, StartPhase, StartRequest};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Commands accepted by the session controller. Each carries the oneshot
/// responder its caller is suspended on.
pub enum Command {
    Start {
        request: StartRequest,
        responder: oneshot::Sender<std::result::Result<(), CommandError>>,
    },
    Stop {
        responder: oneshot::Sender<std::result::Result<(), CommandError>>,
    },
    Capture {
        quality: u8,
        responder: oneshot::Sender<std::result::Result<String, CommandError>>,
    },
    Flip {
        responder: oneshot::Sender<std::result::Result<(), CommandError>>,
    },
    GetSupportedFlashModes {
        responder: oneshot::Sender<std::result::Result<Vec<String>, CommandError>>,
    },
    SetFlashMode {
        mode: Option<String>,
        responder: oneshot::Sender<std::result::Result<(), CommandError>>,
    },
}

/// Exclusive owner of the session state, the call registry and the
/// platform collaborators.
///
/// Runs as a single task: commands, driver events and permission results
/// all arrive over channels and are applied sequentially, so every state
/// or view-hierarchy mutation happens on one logical thread.
pub struct SessionController {
    driver: Box<dyn CameraDriver>,
    permissions: Arc<dyn PermissionGate>,
    display: Arc<dyn DisplayInfo>,
    view: Box<dyn ViewContainer>,

    state: SessionState,
    registry: CallRegistry,

    commands: mpsc::Receiver<Command>,
    driver_events: mpsc::Receiver<DriverEvent>,
    driver_events_tx: mpsc::Sender<DriverEvent>,
    permission_results: mpsc::Receiver<PermissionState>,
    permission_results_tx: mpsc::Sender<PermissionState>,

    cancellation: CancellationToken,
}

impl SessionController {
    /// Process commands and driver events until cancelled or until every
    /// bridge handle is dropped.
    pub async fn run(mut self) {
        info!("Session controller started");

        loop {
            tokio::select! {
                _ = self.cancellation.cancelled() => {
                    info!("Session controller cancelled");
                    break;
                }
                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            debug!("All bridge handles dropped");
                            break;
                        }
                    }
                }
                Some(event) = self.driver_events.recv() => {
                    self.handle_driver_event(event);
                }
                Some(result) = self.permission_results.recv() => {
                    self.handle_permission_result(result);
                }
            }
        }

        self.shutdown();
        info!("Session controller stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start { request, responder } => self.handle_start(request, responder),
            Command::Stop { responder } => {
                let _ = responder.send(self.handle_stop());
            }
            Command::Capture { quality, responder } => self.handle_capture(quality, responder),
            Command::Flip { responder } => {
                let _ = responder.send(self.handle_flip());
            }
            Command::GetSupportedFlashModes { responder } => {
                let _ = responder.send(self.handle_get_flash_modes());
            }
            Command::SetFlashMode { mode, responder } => {
                let _ = responder.send(self.handle_set_flash_mode(mode));
            }
        }
    }

    fn handle_start(
        &mut self,
        request: StartRequest,
        responder: oneshot::Sender<std::result::Result<(), CommandError>>,
    ) {
        if self.registry.start_pending() {
            let _ = responder.send(Err(CommandError::CallPending {
                category: CallCategory::Start,
            }));
            return;
        }

        if self.state.is_running() {
            let _ = responder.send(Err(CommandError::AlreadyStarted));
            return;
        }

        let handle = CallHandle::new(responder);
        if let Err(e) = self.registry.register_start(handle) {
            error!("Failed to register start call: {}", e);
            return;
        }

        match self.permissions.query_state() {
            PermissionState::Granted => self.open_session(request),
            state => {
                debug!("Camera permission is {:?}, prompting the user", state);
                self.state = SessionState::Starting(StartPhase::Permission { request });

                let gate = Arc::clone(&self.permissions);
                let results = self.permission_results_tx.clone();
                tokio::spawn(async move {
                    let outcome = gate.request().await;
                    let _ = results.send(outcome).await;
                });
            }
        }
    }

    fn handle_permission_result(&mut self, result: PermissionState) {
        let request = match std::mem::replace(&mut self.state, SessionState::Stopped) {
            SessionState::Starting(StartPhase::Permission { request }) => request,
            other => {
                warn!(
                    "Ignoring permission result in state {} with no prompt in flight",
                    other.name()
                );
                self.state = other;
                return;
            }
        };

        match result {
            PermissionState::Granted => self.open_session(request),
            _ => {
                info!("Camera permission denied by the user");
                self.registry.reject_start(CommandError::PermissionDenied);
            }
        }
    }

    /// Resolve geometry, mount the preview container and dispatch the
    /// driver open. Leaves the state in `Starting` until the driver's
    /// started event arrives.
    fn open_session(&mut self, request: StartRequest) {
        // A session appearing while this start was suspended is a race
        // the caller must lose
        if self.state.is_running() {
            warn!("Session already exists, rejecting suspended start");
            self.registry.reject_start(CommandError::AlreadyStarted);
            return;
        }

        let density = self.display.density();
        let full_size = self.display.full_size();
        let rect = geometry::resolve(request.placement, density, full_size);

        info!(
            "Opening {:?} camera preview at ({}, {}) {}x{} (density {})",
            request.facing, rect.x, rect.y, rect.width, rect.height, density
        );

        self.view.set_background(Background::Transparent);
        self.view.attach(rect);
        if request.to_back {
            self.view.bring_host_to_front();
        }

        if let Err(e) = self
            .driver
            .open(request.facing, rect, self.driver_events_tx.clone())
        {
            error!("Camera driver failed to open: {}", e);
            self.teardown_view();
            self.state = SessionState::Stopped;
            self.registry.reject_start(e.into());
            return;
        }

        let session = Session {
            facing: request.facing,
            rect,
            to_back: request.to_back,
        };
        self.state = SessionState::Starting(StartPhase::Opening { session });
    }

    fn handle_stop(&mut self) -> std::result::Result<(), CommandError> {
        match std::mem::replace(&mut self.state, SessionState::Stopped) {
            SessionState::Running(session) => {
                info!("Stopping {:?} camera preview", session.facing);
                self.teardown_view();
                self.driver.close();
                Ok(())
            }
            other => {
                self.state = other;
                Err(CommandError::AlreadyStopped)
            }
        }
    }

    fn handle_capture(
        &mut self,
        quality: u8,
        responder: oneshot::Sender<std::result::Result<String, CommandError>>,
    ) {
        if !self.state.is_running() {
            let _ = responder.send(Err(CommandError::NotRunning));
            return;
        }

        if self.registry.capture_pending() {
            let _ = responder.send(Err(CommandError::CallPending {
                category: CallCategory::Capture,
            }));
            return;
        }

        let handle = CallHandle::new(responder);
        let id = handle.id();
        if let Err(e) = self.registry.register_capture(handle) {
            error!("Failed to register capture call: {}", e);
            return;
        }

        debug!("Dispatching capture {} at quality {}", id, quality);

        // Position hint (0, 0) lets the driver pick focus and crop defaults
        if let Err(e) = self.driver.take_picture(0, 0, quality) {
            warn!("Camera driver rejected the capture: {}", e);
            self.registry.reject_capture(e.into());
        }
    }

    fn handle_flip(&mut self) -> std::result::Result<(), CommandError> {
        let session = match &mut self.state {
            SessionState::Running(session) => session,
            _ => return Err(CommandError::FlipFailed),
        };

        match self.driver.switch_facing() {
            Ok(()) => {
                session.facing = session.facing.opposite();
                info!("Flipped camera to {:?}", session.facing);
                Ok(())
            }
            Err(e) => {
                warn!("Camera flip failed: {}", e);
                Err(CommandError::FlipFailed)
            }
        }
    }

    fn handle_get_flash_modes(&mut self) -> std::result::Result<Vec<String>, CommandError> {
        if !self.state.is_running() {
            return Err(CommandError::NotRunning);
        }

        // Queried live on every request, never cached
        let modes = self.driver.supported_flash_modes()?;
        debug!("Driver reports {} flash modes", modes.len());
        Ok(modes)
    }

    fn handle_set_flash_mode(
        &mut self,
        mode: Option<String>,
    ) -> std::result::Result<(), CommandError> {
        if !self.state.is_running() {
            return Err(CommandError::NotRunning);
        }

        let mode = match mode {
            Some(mode) if !mode.is_empty() => mode,
            _ => return Err(CommandError::missing_parameter("flashMode")),
        };

        let supported = self.driver.supported_flash_modes()?;
        if !supported.iter().any(|m| m == &mode) {
            return Err(CommandError::UnsupportedFlashMode { mode });
        }

        self.driver.apply_flash_mode(&mode)?;
        info!("Flash mode set to {}", mode);
        Ok(())
    }

    fn handle_driver_event(&mut self, event: DriverEvent) {
        debug!("Driver event: {}", event.description());

        match event {
            DriverEvent::Started => {
                match std::mem::replace(&mut self.state, SessionState::Stopped) {
                    SessionState::Starting(StartPhase::Opening { session }) => {
                        info!("Camera preview running ({:?})", session.facing);
                        self.state = SessionState::Running(session);
                        self.registry.resolve_start();
                    }
                    other => {
                        warn!("Ignoring started event in state {}", other.name());
                        self.state = other;
                    }
                }
            }
            DriverEvent::StartFailed { message } => {
                match std::mem::replace(&mut self.state, SessionState::Stopped) {
                    SessionState::Starting(StartPhase::Opening { .. }) => {
                        error!("Camera failed to start: {}", message);
                        self.driver.close();
                        self.teardown_view();
                        self.registry.reject_start(CommandError::Driver { message });
                    }
                    other => {
                        warn!("Ignoring start failure in state {}", other.name());
                        self.state = other;
                    }
                }
            }
            DriverEvent::PictureReady { value } => {
                self.registry.resolve_capture(value);
            }
            DriverEvent::PictureError { message } => {
                self.registry.reject_capture(CommandError::Driver { message });
            }
            DriverEvent::FocusSet { x, y } => {
                debug!("Focus set at ({}, {})", x, y);
            }
            DriverEvent::FocusError { message } => {
                warn!("Focus failed: {}", message);
            }
        }
    }

    fn teardown_view(&mut self) {
        self.view.detach();
        self.view.set_background(Background::Opaque);
    }

    fn shutdown(&mut self) {
        match &self.state {
            SessionState::Running(_) | SessionState::Starting(StartPhase::Opening { .. }) => {
                self.driver.close();
                self.teardown_view();
            }
            _ => {}
        }

        self.state = SessionState::Stopped;
        self.registry.reject_all(CommandError::ControllerGone);
    }
}

/// Handle used to stop the controller task.
#[derive(Debug)]
pub struct ControllerHandle {
    cancellation: CancellationToken,
    task: JoinHandle<()>,
}

impl ControllerHandle {
    /// Request shutdown and wait for the controller task to exit. Pending
    /// calls are rejected on the way down.
    pub async fn shutdown(self) {
        self.cancellation.cancel();
        if let Err(e) = self.task.await {
            error!("Session controller task failed: {}", e);
        }
    }
}

/// Builder wiring a session controller to its platform collaborators.
///
/// `build` spawns the controller task onto the current Tokio runtime and
/// returns the bridge handle plus a [`ControllerHandle`] for shutdown.
pub struct SessionControllerBuilder {
    driver: Option<Box<dyn CameraDriver>>,
    permissions: Option<Arc<dyn PermissionGate>>,
    display: Option<Arc<dyn DisplayInfo>>,
    view: Option<Box<dyn ViewContainer>>,
    config: CamlinkConfig,
}

impl SessionControllerBuilder {
    pub fn new() -> Self {
        Self {
            driver: None,
            permissions: None,
            display: None,
            view: None,
            config: CamlinkConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CamlinkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_driver<D: CameraDriver + 'static>(mut self, driver: D) -> Self {
        self.driver = Some(Box::new(driver));
        self
    }

    pub fn with_permission_gate<P: PermissionGate + 'static>(mut self, gate: P) -> Self {
        self.permissions = Some(Arc::new(gate));
        self
    }

    pub fn with_display_info<D: DisplayInfo + 'static>(mut self, display: D) -> Self {
        self.display = Some(Arc::new(display));
        self
    }

    pub fn with_view_container<V: ViewContainer + 'static>(mut self, view: V) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    pub fn build(self) -> Result<(PreviewBridge, ControllerHandle)> {
        let driver = self
            .driver
            .ok_or_else(|| CamlinkError::system("Camera driver must be specified"))?;
        let permissions = self
            .permissions
            .ok_or_else(|| CamlinkError::system("Permission gate must be specified"))?;
        let display = self
            .display
            .ok_or_else(|| CamlinkError::system("Display info must be specified"))?;
        let view = self
            .view
            .ok_or_else(|| CamlinkError::system("View container must be specified"))?;

        self.config.validate()?;

        let (command_tx, command_rx) = mpsc::channel(self.config.bridge.command_queue_capacity);
        let (driver_events_tx, driver_events_rx) =
            mpsc::channel(self.config.bridge.event_queue_capacity);
        let (permission_results_tx, permission_results_rx) = mpsc::channel(4);
        let cancellation = CancellationToken::new();

        let controller = SessionController {
            driver,
            permissions,
            display,
            view,
            state: SessionState::Stopped,
            registry: CallRegistry::new(),
            commands: command_rx,
            driver_events: driver_events_rx,
            driver_events_tx,
            permission_results: permission_results_rx,
            permission_results_tx,
            cancellation: cancellation.clone(),
        };

        let task = tokio::spawn(controller.run());

        let bridge = PreviewBridge::new(command_tx, self.config.capture.default_quality);
        let handle = ControllerHandle { cancellation, task };

        Ok((bridge, handle))
    }
}

impl Default for SessionControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
