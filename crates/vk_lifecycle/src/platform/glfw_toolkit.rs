//! GLFW-backed windowing toolkit
//!
//! Implements [`WindowToolkit`] on top of the `glfw` crate. GLFW terminates
//! when its last `Glfw` handle is dropped, so `terminate` drops ours after the
//! window (which holds its own clone) is gone.

use super::toolkit::{ClientApi, WindowHint, WindowToolkit};

/// GLFW window with its event receiver
pub struct GlfwWindow {
    window: glfw::PWindow,
    // Held so GLFW has somewhere to deliver events; nothing is polled into it
    _events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// GLFW toolkit state
#[derive(Default)]
pub struct GlfwToolkit {
    glfw: Option<glfw::Glfw>,
}

impl GlfwToolkit {
    /// Create an uninitialized toolkit
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowToolkit for GlfwToolkit {
    type Window = GlfwWindow;

    fn initialize(&mut self) -> Result<(), String> {
        let glfw = glfw::init(glfw::log_errors).map_err(|e| format!("{e:?}"))?;
        log::debug!("GLFW {} initialized", glfw::get_version_string());
        self.glfw = Some(glfw);
        Ok(())
    }

    fn set_hint(&mut self, hint: WindowHint) {
        let Some(glfw) = self.glfw.as_mut() else {
            return;
        };
        match hint {
            WindowHint::ClientApi(ClientApi::NoApi) => {
                glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
            }
            WindowHint::ClientApi(ClientApi::OpenGl) => {
                glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
            }
            WindowHint::Resizable(resizable) => {
                glfw.window_hint(glfw::WindowHint::Resizable(resizable));
            }
        }
    }

    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<GlfwWindow> {
        let glfw = self.glfw.as_mut()?;
        let (window, events) =
            glfw.create_window(width, height, title, glfw::WindowMode::Windowed)?;
        Some(GlfwWindow {
            window,
            _events: events,
        })
    }

    fn required_instance_extensions(&self) -> Option<(Vec<String>, u32)> {
        let glfw = self.glfw.as_ref()?;
        if !glfw.vulkan_supported() {
            return None;
        }
        let names = glfw.get_required_instance_extensions()?;
        let count = u32::try_from(names.len()).ok()?;
        Some((names, count))
    }

    fn window_should_close(&self, window: &GlfwWindow) -> bool {
        window.window.should_close()
    }

    fn poll_events(&mut self) {
        if let Some(glfw) = self.glfw.as_mut() {
            glfw.poll_events();
        }
    }

    fn destroy_window(&mut self, window: GlfwWindow) {
        drop(window);
    }

    fn terminate(&mut self) {
        self.glfw = None;
    }
}
