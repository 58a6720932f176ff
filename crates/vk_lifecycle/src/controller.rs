//! Application controller
//!
//! Sequences the platform surface and the graphics instance:
//!
//! 1. toolkit initialize, configure, create window
//! 2. query the platform's instance extensions
//! 3. create the Vulkan instance from that list
//! 4. poll until the window asks to close
//! 5. destroy instance, destroy window, shut the toolkit down
//!
//! A failure anywhere in steps 1–4 skips the remaining forward steps and runs
//! step 5 for exactly the resources that exist. Release order is always the
//! reverse of acquisition.

use crate::config::AppConfig;
use crate::error::{LifecycleError, LifecycleResult};
use crate::graphics::{list_available_extensions, GraphicsInstance, InstanceApi};
use crate::platform::{ClientApi, ExtensionRequest, PlatformSurface, WindowToolkit};

/// Owner of the window and the Vulkan instance for one run
///
/// Dropping the controller runs the same teardown as a finished run, so an
/// unwinding frame step still releases the instance before the window.
pub struct ApplicationController<T: WindowToolkit, A: InstanceApi> {
    config: AppConfig,
    // Newest resource first: fields drop in declaration order
    instance: Option<GraphicsInstance<A>>,
    api: Option<A>,
    surface: PlatformSurface<T>,
    polls: u64,
}

impl<T: WindowToolkit, A: InstanceApi> ApplicationController<T, A> {
    /// Create a controller. Nothing native happens until [`run`](Self::run).
    pub fn new(config: AppConfig, toolkit: T, api: A) -> Self {
        Self {
            config,
            instance: None,
            api: Some(api),
            surface: PlatformSurface::new(toolkit),
            polls: 0,
        }
    }

    /// Configuration this controller runs with
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The platform surface
    pub const fn surface(&self) -> &PlatformSurface<T> {
        &self.surface
    }

    /// The graphics instance, while it exists
    pub const fn instance(&self) -> Option<&GraphicsInstance<A>> {
        self.instance.as_ref()
    }

    /// Number of event polls performed by the loop so far
    pub const fn polls(&self) -> u64 {
        self.polls
    }

    /// Run the full lifecycle with an empty loop body
    pub fn run(&mut self) -> LifecycleResult<()> {
        self.run_with(|_| Ok(()))
    }

    /// Run the full lifecycle, calling `frame` once per loop iteration
    ///
    /// `frame` runs after events are polled and only while the window is not
    /// closing. An error from it ends the loop and goes through teardown like
    /// any other failure.
    pub fn run_with<F>(&mut self, mut frame: F) -> LifecycleResult<()>
    where
        F: FnMut(&GraphicsInstance<A>) -> LifecycleResult<()>,
    {
        let outcome = self.bring_up().and_then(|()| self.event_loop(&mut frame));
        if let Err(err) = &outcome {
            log::debug!("{} failed, tearing down: {err}", err.stage());
        }

        let teardown = self.teardown();
        // The first failure is the one worth reporting
        outcome.and(teardown)
    }

    fn bring_up(&mut self) -> LifecycleResult<()> {
        let api = self.api.take().ok_or(LifecycleError::OutOfOrder {
            operation: "run",
            state: "controller already ran",
        })?;

        let window = &self.config.window;
        self.surface.initialize()?;
        self.surface.configure(ClientApi::NoApi, window.resizable)?;
        self.surface
            .create_window(window.width, window.height, &window.title)?;

        let request = self.surface.required_instance_extensions()?;
        log::info!("Platform requires {} instance extension(s): {:?}", request.count(), request.names());
        report_extension_support(&api, &request)?;

        let instance = GraphicsInstance::create(
            api,
            self.config.instance.clone(),
            request,
            &self.config.extra_extensions,
            &self.config.enabled_layers,
        )?;
        self.instance = Some(instance);
        Ok(())
    }

    fn event_loop<F>(&mut self, frame: &mut F) -> LifecycleResult<()>
    where
        F: FnMut(&GraphicsInstance<A>) -> LifecycleResult<()>,
    {
        let instance = self
            .instance
            .as_ref()
            .ok_or(LifecycleError::UseAfterFree("graphics instance"))?;

        log::info!("Entering event loop");
        loop {
            self.surface.poll_events()?;
            self.polls += 1;
            if self.surface.should_close()? {
                break;
            }
            frame(instance)?;
        }
        log::info!("Window close requested after {} poll(s)", self.polls);
        Ok(())
    }

    /// Release whatever exists, newest first. Keeps going past failures.
    fn teardown(&mut self) -> LifecycleResult<()> {
        let mut first_error = None;
        let mut note = |result: LifecycleResult<()>| {
            if let Err(err) = result {
                log::error!("Teardown step failed: {err}");
                first_error.get_or_insert(err);
            }
        };

        if let Some(mut instance) = self.instance.take() {
            note(instance.destroy());
        }
        if self.surface.has_window() {
            note(self.surface.destroy_window());
        }
        if self.surface.is_initialized() {
            note(self.surface.shutdown());
        }

        first_error.map_or(Ok(()), Err)
    }
}

impl<T: WindowToolkit, A: InstanceApi> Drop for ApplicationController<T, A> {
    fn drop(&mut self) {
        if self.instance.is_some() || self.surface.is_initialized() {
            log::warn!("Application controller dropped mid-run; tearing down");
            // Errors were already logged step by step
            let _ = self.teardown();
        }
    }
}

/// Log what the host offers against what the platform needs
///
/// Diagnostic only: a missing extension is warned about and left for the
/// driver to reject. An inconsistent enumeration is still fatal.
fn report_extension_support<A: InstanceApi>(api: &A, request: &ExtensionRequest) -> LifecycleResult<()> {
    let available = match list_available_extensions(api) {
        Ok(available) => available,
        Err(err @ LifecycleError::EnumerationInconsistency { .. }) => return Err(err),
        Err(err) => {
            log::warn!("Could not list available instance extensions: {err}");
            return Ok(());
        }
    };

    log::debug!("Available instance extensions:");
    for extension in &available {
        log::debug!("\t{} (rev {})", extension.name, extension.spec_version);
    }

    for name in request.names() {
        if !available.iter().any(|extension| &extension.name == name) {
            log::warn!("Required extension {name} is not reported by the host");
        }
    }
    Ok(())
}
