//! Vulkan instance layer

pub mod api;
pub mod ash_api;
pub mod descriptor;
pub mod instance;

pub use api::InstanceApi;
pub use ash_api::AshInstanceApi;
pub use descriptor::{ApplicationInfo, AvailableExtension, InstanceDescriptor, Version};
pub use instance::{list_available_extensions, GraphicsInstance};
