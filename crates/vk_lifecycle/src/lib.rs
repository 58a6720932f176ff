//! # vk_lifecycle
//!
//! Bootstrap layer for a Vulkan application: one GLFW window and one Vulkan
//! instance, brought up in order and torn down in reverse.
//!
//! ## Lifecycle
//!
//! - **Platform surface**: toolkit init, creation hints, native window
//! - **Graphics instance**: created from the extensions the platform requires
//! - **Controller**: runs the event loop and owns teardown order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vk_lifecycle::prelude::*;
//!
//! fn main() -> Result<(), LifecycleError> {
//!     vk_lifecycle::logging::init();
//!     let api = AshInstanceApi::load()?;
//!     let mut app = ApplicationController::new(AppConfig::default(), GlfwToolkit::new(), api);
//!     app.run()
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod controller;
pub mod error;
pub mod graphics;
pub mod logging;
pub mod platform;

#[cfg(test)]
pub(crate) mod tests;

pub use config::{AppConfig, WindowConfig};
pub use controller::ApplicationController;
pub use error::{LifecycleError, LifecycleResult};

/// Common imports for applications
pub mod prelude {
    pub use crate::{
        config::{AppConfig, WindowConfig},
        controller::ApplicationController,
        error::{LifecycleError, LifecycleResult},
        graphics::{AshInstanceApi, GraphicsInstance, InstanceApi, Version},
        platform::{GlfwToolkit, PlatformSurface, WindowToolkit},
    };
}
