//! Instance creation descriptors
//!
//! Owned, NUL-checked versions of `VkApplicationInfo` and
//! `VkInstanceCreateInfo`. Backends turn them into the raw structures right
//! before the native call so no pointer outlives its string.

use crate::error::{LifecycleError, LifecycleResult};
use ash::vk;
use std::ffi::{c_char, CString};
use std::fmt;

/// Three-part semantic version, packed like `VK_MAKE_VERSION`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

impl Version {
    /// Create a version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Packed Vulkan representation
    pub const fn to_vk(self) -> u32 {
        vk::make_api_version(0, self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Application metadata reported to the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    /// Application name
    pub application_name: String,
    /// Application version
    pub application_version: Version,
    /// Engine name
    pub engine_name: String,
    /// Engine version
    pub engine_version: Version,
    /// Highest Vulkan API version the application targets (`vk::API_VERSION_*`)
    pub api_version: u32,
}

/// Everything `vkCreateInstance` needs, with names already converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescriptor {
    /// Application name
    pub application_name: CString,
    /// Packed application version
    pub application_version: u32,
    /// Engine name
    pub engine_name: CString,
    /// Packed engine version
    pub engine_version: u32,
    /// Target API version
    pub api_version: u32,
    /// Extensions to enable, in order
    pub enabled_extensions: Vec<CString>,
    /// Layers to enable, in order
    pub enabled_layers: Vec<CString>,
}

impl InstanceDescriptor {
    /// Build a descriptor, rejecting names with interior NUL bytes
    pub fn new(
        application: &ApplicationInfo,
        extensions: &[String],
        layers: &[String],
    ) -> LifecycleResult<Self> {
        Ok(Self {
            application_name: to_cstring("application name", &application.application_name)?,
            application_version: application.application_version.to_vk(),
            engine_name: to_cstring("engine name", &application.engine_name)?,
            engine_version: application.engine_version.to_vk(),
            api_version: application.api_version,
            enabled_extensions: extensions
                .iter()
                .map(|name| to_cstring("extension", name))
                .collect::<LifecycleResult<_>>()?,
            enabled_layers: layers
                .iter()
                .map(|name| to_cstring("layer", name))
                .collect::<LifecycleResult<_>>()?,
        })
    }

    /// Extension names as UTF-8, in order
    pub fn extension_names(&self) -> Vec<String> {
        self.enabled_extensions
            .iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }

    /// Layer names as UTF-8, in order
    pub fn layer_names(&self) -> Vec<String> {
        self.enabled_layers
            .iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }
}

fn to_cstring(what: &'static str, name: &str) -> LifecycleResult<CString> {
    CString::new(name).map_err(|_| LifecycleError::InvalidName {
        what,
        name: name.to_string(),
    })
}

/// One entry of `vkEnumerateInstanceExtensionProperties`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableExtension {
    /// Extension name
    pub name: String,
    /// Extension specification revision
    pub spec_version: u32,
}

impl From<&vk::ExtensionProperties> for AvailableExtension {
    fn from(properties: &vk::ExtensionProperties) -> Self {
        Self {
            name: fixed_name(&properties.extension_name),
            spec_version: properties.spec_version,
        }
    }
}

/// Read a NUL-terminated fixed-size name array
pub(crate) fn fixed_name(raw: &[c_char]) -> String {
    #[allow(clippy::cast_sign_loss)]
    let bytes: Vec<u8> = raw.iter().take_while(|&&c| c != 0).map(|&c| c as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}
