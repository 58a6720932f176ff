//! Platform surface: one native window plus the toolkit's process-wide state
//!
//! The surface walks a fixed state machine:
//!
//! ```text
//! Uninitialized -> Initialized -> Configured -> WindowOpen -> WindowDestroyed -> ShutDown
//! ```
//!
//! Every operation checks the current state first, so releasing twice or
//! touching a released window is reported as an error instead of reaching
//! the native layer. The close-request flag is read from the toolkit and is
//! not a state of its own; the controller decides when to act on it.

use super::toolkit::{ClientApi, WindowHint, WindowToolkit};
use crate::error::{LifecycleError, LifecycleResult};

/// Where the surface is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// Toolkit not started
    Uninitialized,
    /// Toolkit started, no hints applied
    Initialized,
    /// Creation hints applied
    Configured,
    /// Native window alive
    WindowOpen,
    /// Window released, toolkit still running
    WindowDestroyed,
    /// Toolkit released
    ShutDown,
}

impl SurfaceState {
    const fn describe(self) -> &'static str {
        match self {
            Self::Uninitialized => "toolkit uninitialized",
            Self::Initialized => "toolkit initialized",
            Self::Configured => "toolkit configured",
            Self::WindowOpen => "window open",
            Self::WindowDestroyed => "window destroyed",
            Self::ShutDown => "toolkit shut down",
        }
    }
}

/// Instance extensions the platform needs, in the order the toolkit gave them
///
/// Only a [`PlatformSurface`] can produce one, so a graphics instance can
/// never be created from an invented list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRequest {
    names: Vec<String>,
}

impl ExtensionRequest {
    pub(crate) const fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Extension names in toolkit order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of extensions requested
    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// Whether the platform needs no extensions at all
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Consume the request, keeping the order
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Owner of the native window and the windowing toolkit
pub struct PlatformSurface<T: WindowToolkit> {
    toolkit: T,
    state: SurfaceState,
    window: Option<T::Window>,
    width: u32,
    height: u32,
    title: String,
    resizable: bool,
}

impl<T: WindowToolkit> PlatformSurface<T> {
    /// Wrap a toolkit that has not been started yet
    pub fn new(toolkit: T) -> Self {
        Self {
            toolkit,
            state: SurfaceState::Uninitialized,
            window: None,
            width: 0,
            height: 0,
            title: String::new(),
            resizable: false,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SurfaceState {
        self.state
    }

    /// Whether the toolkit is running and still needs a `shutdown`
    pub const fn is_initialized(&self) -> bool {
        !matches!(self.state, SurfaceState::Uninitialized | SurfaceState::ShutDown)
    }

    /// Whether a native window is alive
    pub const fn has_window(&self) -> bool {
        matches!(self.state, SurfaceState::WindowOpen)
    }

    /// Window size as created
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Window title as created
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Resizable hint applied at configuration
    pub const fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// Access the toolkit (for backend-specific calls)
    pub const fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Start the toolkit. Must be the first call.
    pub fn initialize(&mut self) -> LifecycleResult<()> {
        self.expect_state("initialize", &[SurfaceState::Uninitialized])?;
        self.toolkit.initialize().map_err(LifecycleError::PlatformInit)?;
        self.state = SurfaceState::Initialized;
        log::info!("Windowing toolkit initialized");
        Ok(())
    }

    /// Apply creation hints for the window
    pub fn configure(&mut self, client_api: ClientApi, resizable: bool) -> LifecycleResult<()> {
        self.expect_state(
            "configure",
            &[SurfaceState::Initialized, SurfaceState::Configured],
        )?;
        self.toolkit.set_hint(WindowHint::ClientApi(client_api));
        self.toolkit.set_hint(WindowHint::Resizable(resizable));
        self.resizable = resizable;
        self.state = SurfaceState::Configured;
        Ok(())
    }

    /// Create the native window
    pub fn create_window(&mut self, width: u32, height: u32, title: &str) -> LifecycleResult<()> {
        self.expect_state("create_window", &[SurfaceState::Configured])?;

        let failure = |reason: &str| LifecycleError::WindowCreation {
            width,
            height,
            reason: reason.to_string(),
        };
        if width == 0 || height == 0 {
            return Err(failure("dimensions must be non-zero"));
        }
        if title.contains('\0') {
            return Err(failure("title contains a NUL byte"));
        }

        let window = self
            .toolkit
            .create_window(width, height, title)
            .ok_or_else(|| failure("toolkit returned no window"))?;

        self.window = Some(window);
        self.width = width;
        self.height = height;
        self.title = title.to_string();
        self.state = SurfaceState::WindowOpen;
        log::info!("Created {width}x{height} window \"{title}\"");
        Ok(())
    }

    /// Instance extensions the toolkit needs to present to its windows
    ///
    /// Pure query; repeated calls return the same list.
    pub fn required_instance_extensions(&self) -> LifecycleResult<ExtensionRequest> {
        if !self.is_initialized() {
            return Err(self.rejected("required_instance_extensions"));
        }

        let (names, count) = self.toolkit.required_instance_extensions().ok_or_else(|| {
            LifecycleError::ExtensionQuery(
                "toolkit cannot locate a Vulkan loader for this platform".to_string(),
            )
        })?;

        let listed = u32::try_from(names.len()).unwrap_or(u32::MAX);
        if listed != count {
            return Err(LifecycleError::EnumerationInconsistency {
                query: "required instance extensions",
                first: count,
                second: listed,
            });
        }

        Ok(ExtensionRequest::new(names))
    }

    /// Whether the user or OS asked the window to close
    pub fn should_close(&self) -> LifecycleResult<bool> {
        match &self.window {
            Some(window) => Ok(self.toolkit.window_should_close(window)),
            None if self.state == SurfaceState::WindowDestroyed
                || self.state == SurfaceState::ShutDown =>
            {
                Err(LifecycleError::UseAfterFree("window"))
            }
            None => Err(self.rejected("should_close")),
        }
    }

    /// Drain the OS event queue without blocking
    pub fn poll_events(&mut self) -> LifecycleResult<()> {
        match self.state {
            SurfaceState::ShutDown => Err(LifecycleError::UseAfterFree("windowing toolkit")),
            SurfaceState::Uninitialized => Err(self.rejected("poll_events")),
            _ => {
                self.toolkit.poll_events();
                Ok(())
            }
        }
    }

    /// Release the native window
    pub fn destroy_window(&mut self) -> LifecycleResult<()> {
        match self.state {
            SurfaceState::WindowOpen => {}
            SurfaceState::WindowDestroyed | SurfaceState::ShutDown => {
                return Err(LifecycleError::DoubleFree("window"));
            }
            _ => return Err(self.rejected("destroy_window")),
        }

        if let Some(window) = self.window.take() {
            self.toolkit.destroy_window(window);
        }
        self.state = SurfaceState::WindowDestroyed;
        log::info!("Window destroyed");
        Ok(())
    }

    /// Release the toolkit. The window must already be gone.
    pub fn shutdown(&mut self) -> LifecycleResult<()> {
        match self.state {
            SurfaceState::ShutDown => return Err(LifecycleError::DoubleFree("windowing toolkit")),
            SurfaceState::Uninitialized | SurfaceState::WindowOpen => {
                return Err(self.rejected("shutdown"));
            }
            _ => {}
        }

        self.toolkit.terminate();
        self.state = SurfaceState::ShutDown;
        log::info!("Windowing toolkit shut down");
        Ok(())
    }

    fn expect_state(&self, operation: &'static str, allowed: &[SurfaceState]) -> LifecycleResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(self.rejected(operation))
        }
    }

    const fn rejected(&self, operation: &'static str) -> LifecycleError {
        LifecycleError::OutOfOrder {
            operation,
            state: self.state.describe(),
        }
    }
}

impl<T: WindowToolkit> Drop for PlatformSurface<T> {
    fn drop(&mut self) {
        if let Some(window) = self.window.take() {
            log::warn!("Platform surface dropped with a live window; releasing it");
            self.toolkit.destroy_window(window);
        }
        if self.is_initialized() {
            log::warn!("Platform surface dropped without shutdown; terminating toolkit");
            self.toolkit.terminate();
        }
    }
}
