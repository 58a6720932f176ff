//! Application configuration
//!
//! All values are compile-time defaults; nothing is read from disk or the
//! environment. Callers that need something else build the structs by hand.

use crate::graphics::{ApplicationInfo, Version};
use ash::vk;

/// Top-level configuration for one bootstrap run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Metadata passed to `vkCreateInstance`
    pub instance: ApplicationInfo,

    /// Instance layers to enable. Empty by default.
    pub enabled_layers: Vec<String>,

    /// Extensions appended after the platform-required ones
    ///
    /// Kept separate so the platform list is never modified implicitly.
    pub extra_extensions: Vec<String>,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Whether window is resizable
    pub resizable: bool,
}

impl WindowConfig {
    /// Default client width
    pub const DEFAULT_WIDTH: u32 = 800;
    /// Default client height
    pub const DEFAULT_HEIGHT: u32 = 600;
    /// Default title
    pub const DEFAULT_TITLE: &'static str = "Vulkan";
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            resizable: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            instance: ApplicationInfo {
                application_name: "Hello Triangle".to_string(),
                application_version: Version::new(1, 0, 0),
                engine_name: "No Engine".to_string(),
                engine_version: Version::new(1, 0, 0),
                api_version: vk::API_VERSION_1_0,
            },
            enabled_layers: Vec::new(),
            extra_extensions: Vec::new(),
        }
    }
}
