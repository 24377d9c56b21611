//! MenuControllerBuilder for fluent controller construction.

use std::sync::Arc;

use crate::error::Error;
use crate::permission::{PermissionGate, PermissionHost};
use crate::registry::{ContentScriptRegistry, ScriptHost};
use crate::script::{ScriptCatalog, ScriptId};
use crate::store::{BindingStore, MemoryBindingStore};
use crate::tabs::TabHost;

use super::{MenuController, MenuSurface};

/// Builder for creating a [`MenuController`].
///
/// The four host interfaces are required; the binding store defaults to
/// an in-memory store and the script catalog to the bundled files.
///
/// # Example
///
/// ```ignore
/// use sitewire_core::{MenuController, ScriptId};
///
/// let controller = MenuController::builder()
///     .permission_host(permissions)
///     .script_host(scripts)
///     .tab_host(tabs)
///     .surface(menu)
///     .store(Arc::new(FileBindingStore::new(path)))
///     .with_script_file(ScriptId::Github, "enterprise-github.js")
///     .build()?;
/// ```
pub struct MenuControllerBuilder {
    permission_host: Option<Arc<dyn PermissionHost>>,
    script_host: Option<Arc<dyn ScriptHost>>,
    tab_host: Option<Arc<dyn TabHost>>,
    surface: Option<Arc<dyn MenuSurface>>,
    /// Custom binding store (if None, uses MemoryBindingStore)
    store: Option<Arc<dyn BindingStore>>,
    catalog: ScriptCatalog,
}

impl MenuControllerBuilder {
    pub(super) fn new() -> Self {
        Self {
            permission_host: None,
            script_host: None,
            tab_host: None,
            surface: None,
            store: None,
            catalog: ScriptCatalog::default(),
        }
    }

    /// Set the platform permission API.
    pub fn permission_host(mut self, host: Arc<dyn PermissionHost>) -> Self {
        self.permission_host = Some(host);
        self
    }

    /// Set the platform content script API.
    pub fn script_host(mut self, host: Arc<dyn ScriptHost>) -> Self {
        self.script_host = Some(host);
        self
    }

    /// Set the platform tab API.
    pub fn tab_host(mut self, host: Arc<dyn TabHost>) -> Self {
        self.tab_host = Some(host);
        self
    }

    /// Set the menu rendering surface.
    pub fn surface(mut self, surface: Arc<dyn MenuSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Use a custom binding store instead of the in-memory default.
    pub fn store(mut self, store: Arc<dyn BindingStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the injected file for one script id.
    pub fn with_script_file(mut self, id: ScriptId, file: impl Into<String>) -> Self {
        self.catalog.set_file(id, file);
        self
    }

    /// Build the controller.
    ///
    /// Fails with [`Error::Config`] if any host interface is missing.
    pub fn build(self) -> crate::Result<MenuController> {
        let permission_host = self
            .permission_host
            .ok_or_else(|| Error::Config("permission host is required".to_string()))?;
        let script_host = self
            .script_host
            .ok_or_else(|| Error::Config("script host is required".to_string()))?;
        let tabs = self
            .tab_host
            .ok_or_else(|| Error::Config("tab host is required".to_string()))?;
        let surface = self
            .surface
            .ok_or_else(|| Error::Config("menu surface is required".to_string()))?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryBindingStore::new()));

        Ok(MenuController {
            gate: PermissionGate::new(permission_host),
            registry: tokio::sync::RwLock::new(ContentScriptRegistry::new(
                script_host,
                self.catalog,
            )),
            store,
            tabs,
            surface,
            hooks: parking_lot::RwLock::new(Vec::new()),
        })
    }
}
