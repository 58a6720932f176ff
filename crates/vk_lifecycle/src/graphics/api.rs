//! Vulkan global-command boundary
//!
//! The three instance-level calls the bootstrap needs. Keeping them behind a
//! trait lets the lifecycle run against a recording fake in tests.

use super::descriptor::InstanceDescriptor;
use ash::vk;

/// Native graphics API entry points
pub trait InstanceApi {
    /// Owned instance handle produced by `create_instance`
    type Handle;

    /// `vkEnumerateInstanceExtensionProperties` with no layer filter
    ///
    /// With `properties == None` only the count is written. Otherwise `count`
    /// is the buffer capacity on input and the number written on output;
    /// `INCOMPLETE` means more entries exist than fit.
    fn enumerate_instance_extension_properties(
        &self,
        count: &mut u32,
        properties: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result;

    /// `vkCreateInstance` with default allocation callbacks
    fn create_instance(&self, descriptor: &InstanceDescriptor) -> Result<Self::Handle, vk::Result>;

    /// `vkDestroyInstance` with default allocation callbacks
    fn destroy_instance(&self, handle: Self::Handle);
}
