//! Top-level error types for sitewire
//!
//! This module provides a simplified, user-facing error type that flattens
//! the per-module error hierarchy into actionable categories.

use thiserror::Error;

use crate::permission::PermissionError;
use crate::registry::RegistryError;
use crate::store::BindingStoreError;
use crate::tabs::TabError;

/// Top-level error type for sitewire operations
///
/// This enum provides a flattened view of errors, categorized by the
/// host surface they came from:
///
/// - [`Error::Permission`] - the platform permission API failed
/// - [`Error::Registration`] - the script injection API failed
/// - [`Error::Storage`] - the binding store failed
/// - [`Error::Tab`] - the tab API failed
/// - [`Error::Config`] - fix controller construction
///
/// Note that a denied permission prompt is not an error: the gate
/// resolves it as `Ok(false)` and the toggle reverts the checkbox.
#[derive(Debug, Error)]
pub enum Error {
    /// Platform permission API failure
    #[error("permission error: {0}")]
    Permission(String),

    /// Script registration failure
    #[error("registration error: {0}")]
    Registration(String),

    /// Binding store failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Tab API failure
    #[error("tab error: {0}")]
    Tab(String),

    /// Configuration error (missing host interface)
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if this is a permission host error
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Permission(_))
    }

    /// Returns true if this is a script registration error
    pub fn is_registration(&self) -> bool {
        matches!(self, Self::Registration(_))
    }

    /// Returns true if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns true if this is a tab error
    pub fn is_tab(&self) -> bool {
        matches!(self, Self::Tab(_))
    }

    /// Returns true if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<PermissionError> for Error {
    fn from(err: PermissionError) -> Self {
        Error::Permission(err.to_string())
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        Error::Registration(err.to_string())
    }
}

impl From<BindingStoreError> for Error {
    fn from(err: BindingStoreError) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<TabError> for Error {
    fn from(err: TabError) -> Self {
        Error::Tab(err.to_string())
    }
}

/// Result type alias for sitewire operations
pub type Result<T> = std::result::Result<T, Error>;
