//! Windowing toolkit boundary
//!
//! The calls [`PlatformSurface`](super::PlatformSurface) makes into the
//! native toolkit. The trait mirrors the C API closely on purpose: the surface
//! owns all ordering and double-release checks, implementations only forward.

/// Client API the toolkit should prepare the window for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientApi {
    /// No OpenGL context; the window is presented through Vulkan
    NoApi,
    /// Toolkit default (an OpenGL context)
    OpenGl,
}

/// Window creation hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHint {
    /// Which client API context to create
    ClientApi(ClientApi),
    /// Whether the user can resize the window
    Resizable(bool),
}

/// Native windowing toolkit
///
/// # Thread Safety
/// Implementations are driven from the main thread only. No `Send` bound is
/// required because GLFW itself must not be called from other threads.
pub trait WindowToolkit {
    /// Opaque native window handle
    type Window;

    /// Start the toolkit. The error string describes why it could not.
    fn initialize(&mut self) -> Result<(), String>;

    /// Set a hint for the next window creation
    fn set_hint(&mut self, hint: WindowHint);

    /// Create a windowed-mode window. `None` mirrors a null native handle.
    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<Self::Window>;

    /// Instance extensions required to present to this toolkit's windows
    ///
    /// Returns the names together with the count the toolkit reported, or
    /// `None` when the toolkit cannot find a usable Vulkan loader.
    fn required_instance_extensions(&self) -> Option<(Vec<String>, u32)>;

    /// Whether closing has been requested for `window`
    fn window_should_close(&self, window: &Self::Window) -> bool;

    /// Process pending events without blocking
    fn poll_events(&mut self);

    /// Release a window
    fn destroy_window(&mut self, window: Self::Window);

    /// Release all toolkit state
    fn terminate(&mut self);
}
