//! Vulkan instance ownership
//!
//! [`GraphicsInstance`] creates the instance from the platform's extension
//! request and releases it exactly once. The platform list is passed through
//! untouched; anything extra must be named explicitly by the caller.

use super::api::InstanceApi;
use super::descriptor::{ApplicationInfo, AvailableExtension, InstanceDescriptor};
use crate::error::{LifecycleError, LifecycleResult};
use crate::platform::ExtensionRequest;
use ash::vk;

const EXTENSION_QUERY: &str = "instance extension properties";

/// Every instance extension the host supports
///
/// Sizes the buffer with one call and fills it with a second. A count that
/// changes between the two calls means the loader or driver is inconsistent,
/// which is reported as [`LifecycleError::EnumerationInconsistency`].
pub fn list_available_extensions<A: InstanceApi + ?Sized>(
    api: &A,
) -> LifecycleResult<Vec<AvailableExtension>> {
    let mut expected = 0u32;
    let code = api.enumerate_instance_extension_properties(&mut expected, None);
    if code != vk::Result::SUCCESS {
        return Err(LifecycleError::ExtensionQuery(format!(
            "sizing {EXTENSION_QUERY} returned {code:?}"
        )));
    }

    let mut properties = vec![vk::ExtensionProperties::default(); expected as usize];
    let mut written = expected;
    match api.enumerate_instance_extension_properties(&mut written, Some(&mut properties)) {
        vk::Result::SUCCESS if written == expected => {}
        vk::Result::SUCCESS => {
            return Err(LifecycleError::EnumerationInconsistency {
                query: EXTENSION_QUERY,
                first: expected,
                second: written,
            });
        }
        vk::Result::INCOMPLETE => {
            // The list grew after sizing; re-query so the report carries the new count
            let mut now = 0u32;
            let second = match api.enumerate_instance_extension_properties(&mut now, None) {
                vk::Result::SUCCESS => now,
                _ => written,
            };
            return Err(LifecycleError::EnumerationInconsistency {
                query: EXTENSION_QUERY,
                first: expected,
                second,
            });
        }
        code => {
            return Err(LifecycleError::ExtensionQuery(format!(
                "filling {EXTENSION_QUERY} returned {code:?}"
            )));
        }
    }

    Ok(properties.iter().map(AvailableExtension::from).collect())
}

/// Owned Vulkan instance
///
/// Holds the API it was created through so the handle can never outlive its
/// loader. It keeps no reference to the platform surface.
pub struct GraphicsInstance<A: InstanceApi> {
    api: A,
    handle: Option<A::Handle>,
    application: ApplicationInfo,
    enabled_extensions: Vec<String>,
    enabled_layers: Vec<String>,
}

impl<A: InstanceApi> GraphicsInstance<A> {
    /// Create the instance
    ///
    /// `request` goes to the driver verbatim, followed by `extra_extensions`.
    /// A non-success result from the driver becomes
    /// [`LifecycleError::InstanceCreation`] with the native code.
    pub fn create(
        api: A,
        application: ApplicationInfo,
        request: ExtensionRequest,
        extra_extensions: &[String],
        enabled_layers: &[String],
    ) -> LifecycleResult<Self> {
        let mut enabled_extensions = request.into_names();
        enabled_extensions.extend_from_slice(extra_extensions);

        let descriptor = InstanceDescriptor::new(&application, &enabled_extensions, enabled_layers)?;

        log::info!(
            "Creating Vulkan instance for {} {} (engine {} {}, API {}.{})",
            application.application_name,
            application.application_version,
            application.engine_name,
            application.engine_version,
            vk::api_version_major(application.api_version),
            vk::api_version_minor(application.api_version),
        );
        log::debug!("Enabled extensions: {enabled_extensions:?}");
        log::debug!("Enabled layers: {enabled_layers:?}");

        let handle = api
            .create_instance(&descriptor)
            .map_err(|code| LifecycleError::InstanceCreation { code })?;

        log::info!("Vulkan instance created");
        Ok(Self {
            api,
            handle: Some(handle),
            application,
            enabled_extensions,
            enabled_layers: enabled_layers.to_vec(),
        })
    }

    /// Native instance handle
    pub fn handle(&self) -> LifecycleResult<&A::Handle> {
        self.handle
            .as_ref()
            .ok_or(LifecycleError::UseAfterFree("graphics instance"))
    }

    /// Whether the handle has not been released yet
    pub const fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Application metadata the instance was created with
    pub const fn application(&self) -> &ApplicationInfo {
        &self.application
    }

    /// Extensions enabled at creation, in the order they were passed
    pub fn enabled_extensions(&self) -> &[String] {
        &self.enabled_extensions
    }

    /// Number of layers enabled at creation
    pub fn enabled_layer_count(&self) -> usize {
        self.enabled_layers.len()
    }

    /// Every extension the host supports, independent of what is enabled
    pub fn list_available_extensions(&self) -> LifecycleResult<Vec<AvailableExtension>> {
        list_available_extensions(&self.api)
    }

    /// Release the instance
    pub fn destroy(&mut self) -> LifecycleResult<()> {
        let handle = self
            .handle
            .take()
            .ok_or(LifecycleError::DoubleFree("graphics instance"))?;
        self.api.destroy_instance(handle);
        log::info!("Vulkan instance destroyed");
        Ok(())
    }
}

impl<A: InstanceApi> Drop for GraphicsInstance<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::warn!("Graphics instance dropped without destroy; releasing it");
            self.api.destroy_instance(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::tests::fakes::{FakeInstanceApi, FakeInstanceHandle, Journal, NativeCall};

    fn request(names: &[&str]) -> ExtensionRequest {
        ExtensionRequest::new(names.iter().map(ToString::to_string).collect())
    }

    fn create(
        api: FakeInstanceApi,
        names: &[&str],
    ) -> LifecycleResult<GraphicsInstance<FakeInstanceApi>> {
        GraphicsInstance::create(api, AppConfig::default().instance, request(names), &[], &[])
    }

    #[test]
    fn test_list_available_extensions() {
        let journal = Journal::default();
        let api = FakeInstanceApi::new(&journal);

        let names: Vec<String> = list_available_extensions(&api)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["VK_KHR_surface", "VK_KHR_xcb_surface", "VK_EXT_debug_utils"]);
        assert_eq!(
            journal.calls(),
            vec![
                NativeCall::EnumerateExtensions { filled: false },
                NativeCall::EnumerateExtensions { filled: true },
            ]
        );
    }

    #[test]
    fn test_count_growing_between_calls_is_inconsistent() {
        let journal = Journal::default();
        let mut api = FakeInstanceApi::new(&journal);
        api.drift = 2;

        assert_eq!(
            list_available_extensions(&api),
            Err(LifecycleError::EnumerationInconsistency {
                query: EXTENSION_QUERY,
                first: 3,
                second: 5,
            })
        );
    }

    #[test]
    fn test_failed_requery_reports_filled_count() {
        let journal = Journal::default();
        let mut api = FakeInstanceApi::new(&journal);
        api.drift = 2;
        api.late_failure = Some((2, vk::Result::ERROR_OUT_OF_HOST_MEMORY));

        assert_eq!(
            list_available_extensions(&api),
            Err(LifecycleError::EnumerationInconsistency {
                query: EXTENSION_QUERY,
                first: 3,
                second: 3,
            })
        );
        assert_eq!(journal.calls().len(), 3);
    }

    #[test]
    fn test_count_failure() {
        let journal = Journal::default();
        let mut api = FakeInstanceApi::new(&journal);
        api.enumerate_result = vk::Result::ERROR_OUT_OF_HOST_MEMORY;

        assert!(matches!(
            list_available_extensions(&api),
            Err(LifecycleError::ExtensionQuery(_))
        ));
    }

    #[test]
    fn test_create_with_supported_extensions() {
        let journal = Journal::default();
        let instance = create(FakeInstanceApi::new(&journal), &["VK_KHR_surface", "VK_KHR_xcb_surface"])
            .unwrap();

        assert!(instance.is_live());
        assert_eq!(instance.handle().unwrap(), &FakeInstanceHandle(1));
        assert_eq!(instance.enabled_extensions(), ["VK_KHR_surface", "VK_KHR_xcb_surface"]);
        assert_eq!(instance.enabled_layer_count(), 0);
        assert_eq!(instance.application().application_name, "Hello Triangle");
    }

    #[test]
    fn test_available_listing_ignores_enabled_set() {
        let journal = Journal::default();
        let instance = create(FakeInstanceApi::new(&journal), &["VK_KHR_surface"]).unwrap();

        let available = instance.list_available_extensions().unwrap();
        assert_eq!(available.len(), 3);
        assert_eq!(instance.enabled_extensions().len(), 1);
    }

    #[test]
    fn test_request_passed_verbatim_then_extras() {
        let journal = Journal::default();
        let extras = vec!["VK_EXT_debug_utils".to_string()];
        let _instance = GraphicsInstance::create(
            FakeInstanceApi::new(&journal),
            AppConfig::default().instance,
            request(&["VK_KHR_xcb_surface", "VK_KHR_surface"]),
            &extras,
            &[],
        )
        .unwrap();

        assert!(journal.calls().contains(&NativeCall::CreateInstance {
            extensions: vec![
                "VK_KHR_xcb_surface".to_string(),
                "VK_KHR_surface".to_string(),
                "VK_EXT_debug_utils".to_string(),
            ],
            layers: vec![],
        }));
    }

    #[test]
    fn test_unsupported_extension_fails_with_native_code() {
        let journal = Journal::default();
        let result = create(FakeInstanceApi::new(&journal), &["VK_KHR_surface", "VK_FAKE_bogus_surface"]);

        assert_eq!(
            result.err(),
            Some(LifecycleError::InstanceCreation {
                code: vk::Result::ERROR_EXTENSION_NOT_PRESENT
            })
        );
        assert!(!journal.calls().contains(&NativeCall::DestroyInstance));
    }

    #[test]
    fn test_unknown_layer_fails() {
        let journal = Journal::default();
        let layers = vec!["VK_LAYER_KHRONOS_validation".to_string()];
        let result = GraphicsInstance::create(
            FakeInstanceApi::new(&journal),
            AppConfig::default().instance,
            request(&[]),
            &[],
            &layers,
        );

        assert_eq!(
            result.err(),
            Some(LifecycleError::InstanceCreation {
                code: vk::Result::ERROR_LAYER_NOT_PRESENT
            })
        );
    }

    #[test]
    fn test_destroy_once() {
        let journal = Journal::default();
        let mut instance = create(FakeInstanceApi::new(&journal), &[]).unwrap();

        instance.destroy().unwrap();
        assert!(!instance.is_live());
        assert_eq!(instance.destroy(), Err(LifecycleError::DoubleFree("graphics instance")));
        assert!(matches!(
            instance.handle(),
            Err(LifecycleError::UseAfterFree("graphics instance"))
        ));
        drop(instance);

        let destroys = journal
            .calls()
            .iter()
            .filter(|c| **c == NativeCall::DestroyInstance)
            .count();
        assert_eq!(destroys, 1);
    }

    #[test]
    fn test_drop_releases_live_instance() {
        let journal = Journal::default();
        drop(create(FakeInstanceApi::new(&journal), &[]).unwrap());
        assert_eq!(journal.calls().last(), Some(&NativeCall::DestroyInstance));
    }
}
