//! ash-backed Vulkan entry points

#![allow(unsafe_code)]

use super::api::InstanceApi;
use super::descriptor::InstanceDescriptor;
use crate::error::{LifecycleError, LifecycleResult};
use ash::{vk, Entry, Instance};
use std::ffi::c_char;
use std::ptr;

/// Vulkan loader opened through ash
pub struct AshInstanceApi {
    entry: Entry,
}

impl AshInstanceApi {
    /// Load the system Vulkan library
    pub fn load() -> LifecycleResult<Self> {
        let entry = unsafe { Entry::load() }
            .map_err(|e| LifecycleError::LoaderUnavailable(format!("{e:?}")))?;
        Ok(Self { entry })
    }

    /// The underlying ash entry
    pub const fn entry(&self) -> &Entry {
        &self.entry
    }
}

impl InstanceApi for AshInstanceApi {
    type Handle = Instance;

    fn enumerate_instance_extension_properties(
        &self,
        count: &mut u32,
        properties: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result {
        // ash's own wrapper hides the two calls, so go through the raw pointer
        let out = match properties {
            Some(buffer) => {
                let capacity = u32::try_from(buffer.len()).unwrap_or(u32::MAX);
                *count = (*count).min(capacity);
                buffer.as_mut_ptr()
            }
            None => ptr::null_mut(),
        };
        unsafe {
            (self.entry.fp_v1_0().enumerate_instance_extension_properties)(ptr::null(), count, out)
        }
    }

    fn create_instance(&self, descriptor: &InstanceDescriptor) -> Result<Instance, vk::Result> {
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&descriptor.application_name)
            .application_version(descriptor.application_version)
            .engine_name(&descriptor.engine_name)
            .engine_version(descriptor.engine_version)
            .api_version(descriptor.api_version);

        let extensions: Vec<*const c_char> = descriptor
            .enabled_extensions
            .iter()
            .map(|name| name.as_ptr())
            .collect();
        let layers: Vec<*const c_char> = descriptor
            .enabled_layers
            .iter()
            .map(|name| name.as_ptr())
            .collect();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extensions)
            .enabled_layer_names(&layers);

        unsafe { self.entry.create_instance(&create_info, None) }
    }

    fn destroy_instance(&self, handle: Instance) {
        unsafe { handle.destroy_instance(None) };
    }
}
