//! Lifecycle error types
//!
//! Every failure the bootstrap layer can produce is one variant of
//! [`LifecycleError`]. Nothing here is retried: missing platform support, an
//! unsupported extension and API misuse are all permanent for the process.

use ash::vk;
use thiserror::Error;

/// Errors raised while bringing the window and Vulkan instance up or down
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The windowing toolkit could not start (no display server, missing driver)
    #[error("GLFW initialization failed: {0}")]
    PlatformInit(String),

    /// The native window could not be created
    #[error("window creation failed ({width}x{height}): {reason}")]
    WindowCreation {
        /// Requested client width
        width: u32,
        /// Requested client height
        height: u32,
        /// What went wrong
        reason: String,
    },

    /// An extension query returned an error instead of a list
    #[error("extension query failed: {0}")]
    ExtensionQuery(String),

    /// The Vulkan loader library could not be opened
    #[error("Vulkan loader unavailable: {0}")]
    LoaderUnavailable(String),

    /// `vkCreateInstance` did not report success
    #[error("failed to create Vulkan instance: {code:?}")]
    InstanceCreation {
        /// Native result code returned by the driver
        code: vk::Result,
    },

    /// A name handed to the native layer contains an interior NUL byte
    #[error("invalid name for {what}: {name:?}")]
    InvalidName {
        /// Which field the name belongs to
        what: &'static str,
        /// The offending value
        name: String,
    },

    /// The count returned by a two-call enumeration changed between calls
    #[error("{query} reported {first} entries, then {second}")]
    EnumerationInconsistency {
        /// Which enumeration disagreed with itself
        query: &'static str,
        /// Count from the sizing call
        first: u32,
        /// Count from the filling call
        second: u32,
    },

    /// An operation was called in a lifecycle state that does not allow it
    #[error("{operation} called while {state}")]
    OutOfOrder {
        /// The rejected operation
        operation: &'static str,
        /// The state the resource was in
        state: &'static str,
    },

    /// A resource was released twice
    #[error("{0} released twice")]
    DoubleFree(&'static str),

    /// A resource was used after it was released
    #[error("{0} used after release")]
    UseAfterFree(&'static str),
}

impl LifecycleError {
    /// Human-readable name of the stage that failed
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::PlatformInit(_) => "platform initialization",
            Self::WindowCreation { .. } => "window creation",
            Self::ExtensionQuery(_) => "extension query",
            Self::LoaderUnavailable(_) => "Vulkan loader",
            Self::InstanceCreation { .. } | Self::InvalidName { .. } => "instance creation",
            Self::EnumerationInconsistency { .. } => "extension enumeration",
            Self::OutOfOrder { .. } | Self::DoubleFree(_) | Self::UseAfterFree(_) => "lifecycle",
        }
    }

    /// Process exit status for this failure. Never zero.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::PlatformInit(_) => 2,
            Self::WindowCreation { .. } => 3,
            Self::ExtensionQuery(_) => 4,
            Self::LoaderUnavailable(_) => 5,
            Self::InstanceCreation { .. } | Self::InvalidName { .. } => 6,
            Self::EnumerationInconsistency { .. } => 7,
            // EX_SOFTWARE: internal misuse, not an environment problem
            Self::OutOfOrder { .. } | Self::DoubleFree(_) | Self::UseAfterFree(_) => 70,
        }
    }

    /// Whether the error indicates a bug in the caller rather than the host
    pub const fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::OutOfOrder { .. } | Self::DoubleFree(_) | Self::UseAfterFree(_)
        )
    }
}

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;
