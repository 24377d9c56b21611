//! Menu controller: renders checkbox state and drives user toggles.
//!
//! The controller is the orchestrator of the crate. It derives the menu's
//! state from the permission gate, binding store, and registry, renders
//! it atomically through the [`MenuSurface`], and sequences the
//! grant/register/persist/reload chain behind a checkbox toggle.

mod builder;
mod refresh;
mod toggle;
mod types;

pub use builder::MenuControllerBuilder;
pub use types::{MenuClick, MenuState, RestoreOutcome};

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::{MenuEvent, MenuHook};
use crate::origin::Origin;
use crate::permission::PermissionGate;
use crate::registry::ContentScriptRegistry;
use crate::store::BindingStore;
use crate::tabs::TabHost;

/// The menu's visual surface: one disabled-when-locked parent item with
/// three checkbox children.
///
/// The surface receives the complete derived state in a single call and
/// applies it atomically. Render failures are the surface's own problem;
/// the platform menu API swallows errors for items that briefly do not
/// exist, and the core follows suit.
#[async_trait]
pub trait MenuSurface: Send + Sync {
    /// Apply `state` to the parent item and the three checkboxes.
    async fn render(&self, state: MenuState);
}

/// Orchestrates menu rendering and checkbox toggles.
///
/// Create one with the builder:
///
/// ```ignore
/// use sitewire_core::MenuController;
///
/// let controller = MenuController::builder()
///     .permission_host(permissions)
///     .script_host(scripts)
///     .tab_host(tabs)
///     .surface(menu)
///     .build()?;
///
/// controller.restore_registrations().await?;
/// ```
pub struct MenuController {
    pub(super) gate: PermissionGate,
    /// Live origin → handle map. Only the registry itself mutates it;
    /// the controller serializes access through this lock.
    pub(super) registry: tokio::sync::RwLock<ContentScriptRegistry>,
    pub(super) store: Arc<dyn BindingStore>,
    pub(super) tabs: Arc<dyn TabHost>,
    pub(super) surface: Arc<dyn MenuSurface>,
    pub(super) hooks: parking_lot::RwLock<Vec<Arc<dyn MenuHook>>>,
}

impl MenuController {
    /// Start building a controller.
    pub fn builder() -> MenuControllerBuilder {
        MenuControllerBuilder::new()
    }

    /// Add an event hook observing refreshes and toggles.
    pub fn add_hook(&self, hook: impl MenuHook + 'static) {
        self.hooks.write().push(Arc::new(hook));
    }

    /// Emit an event to all registered hooks.
    pub(crate) fn emit_event(&self, event: MenuEvent) {
        let hooks = self.hooks.read();
        for hook in hooks.iter() {
            hook.on_event(&event);
        }
    }

    /// Whether `origin` currently has a live script registration.
    pub async fn has_active_registration(&self, origin: &Origin) -> bool {
        self.registry.read().await.has_active(origin)
    }

    /// Origins with a live script registration.
    pub async fn active_registrations(&self) -> Vec<Origin> {
        self.registry.read().await.active_origins()
    }
}
