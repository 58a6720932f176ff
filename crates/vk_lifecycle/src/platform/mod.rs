//! Windowing platform layer

pub mod glfw_toolkit;
pub mod surface;
pub mod toolkit;

pub use glfw_toolkit::{GlfwToolkit, GlfwWindow};
pub use surface::{ExtensionRequest, PlatformSurface, SurfaceState};
pub use toolkit::{ClientApi, WindowHint, WindowToolkit};
