//! Hello Triangle bootstrap
//!
//! Opens an 800x600 "Vulkan" window, creates a Vulkan instance with the
//! extensions GLFW asks for, and waits for the window to be closed.

use std::process::ExitCode;
use vk_lifecycle::prelude::*;

fn main() -> ExitCode {
    vk_lifecycle::logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} failed: {}", e.stage(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> LifecycleResult<()> {
    log::info!("Starting hello_triangle...");
    let api = AshInstanceApi::load()?;
    let mut app = ApplicationController::new(AppConfig::default(), GlfwToolkit::new(), api);
    app.run()?;
    log::info!("Shutdown complete");
    Ok(())
}
