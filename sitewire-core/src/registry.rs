//! Live content script registrations, one per origin.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::origin::Origin;
use crate::script::{ScriptCatalog, ScriptId};

/// Errors raised while registering or unregistering scripts.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The platform script-injection API failed.
    #[error("script host error: {0}")]
    Host(String),
}

/// What the host should inject, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Match patterns the script applies to, e.g. `https://github.com/*`.
    pub matches: Vec<String>,

    /// Bundled script file to inject.
    pub js_file: String,
}

/// Capability to undo one successful registration.
///
/// Issued by the [`ScriptHost`], owned exclusively by the
/// [`ContentScriptRegistry`], and consumed exactly once when the
/// registration is replaced or removed. Deliberately neither `Clone` nor
/// `Copy` so the type system enforces single consumption.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RegistrationHandle(u64);

impl RegistrationHandle {
    /// Wrap a host-issued registration id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The host-issued registration id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The platform's dynamic content script API, as consumed by the registry.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    /// Inject a script into all current and future documents matching the
    /// request, returning the handle that undoes it.
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationHandle, RegistryError>;

    /// Consume a handle, removing its registration.
    async fn unregister(&self, handle: RegistrationHandle) -> Result<(), RegistryError>;
}

/// Owns the live origin → registration mapping.
///
/// Guarantees exactly zero or one active registration per origin at all
/// times. Replacing a registration unregisters the old handle before the
/// new script is registered, so two scripts are never simultaneously
/// injected for one origin, even transiently.
///
/// Single-writer policy: only this registry mutates the handle map. It is
/// injected into the menu controller and never accessed ambiently.
pub struct ContentScriptRegistry {
    host: Arc<dyn ScriptHost>,
    catalog: ScriptCatalog,
    handles: HashMap<Origin, RegistrationHandle>,
}

impl ContentScriptRegistry {
    /// Create an empty registry over a script host.
    pub fn new(host: Arc<dyn ScriptHost>, catalog: ScriptCatalog) -> Self {
        Self {
            host,
            catalog,
            handles: HashMap::new(),
        }
    }

    /// Inject `script` into `origin`, replacing any existing registration.
    pub async fn register(
        &mut self,
        origin: Origin,
        script: ScriptId,
    ) -> Result<(), RegistryError> {
        // Replace, not stack: the old handle goes away before the new
        // script is registered.
        if let Some(old) = self.handles.remove(&origin) {
            self.host.unregister(old).await?;
        }

        let request = RegistrationRequest {
            matches: vec![origin.match_pattern()],
            js_file: self.catalog.file_for(script).to_string(),
        };
        let handle = self.host.register(request).await?;
        self.handles.insert(origin, handle);
        Ok(())
    }

    /// Remove the registration for `origin` if one exists.
    ///
    /// Returns `true` if a registration was removed. Calling this for an
    /// origin with no registration is a no-op.
    pub async fn unregister(&mut self, origin: &Origin) -> Result<bool, RegistryError> {
        match self.handles.remove(origin) {
            Some(handle) => {
                self.host.unregister(handle).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether `origin` currently has a live registration.
    pub fn has_active(&self, origin: &Origin) -> bool {
        self.handles.contains_key(origin)
    }

    /// Origins with a live registration.
    pub fn active_origins(&self) -> Vec<Origin> {
        self.handles.keys().cloned().collect()
    }
}
