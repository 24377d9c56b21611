//! Events emitted while the menu core works.
//!
//! These events let observers follow refreshes, toggles, and startup
//! restoration in real time - the crate's logging surface. Hooks are
//! called synchronously, in registration order.

use crate::menu::MenuState;
use crate::origin::Origin;
use crate::script::ScriptId;
use crate::tabs::TabId;

/// Events emitted during menu refreshes and toggles.
#[derive(Debug, Clone)]
pub enum MenuEvent {
    // ===== Refresh =====
    /// A menu refresh started for a tab.
    RefreshStarted {
        /// The tab being refreshed.
        tab: TabId,
    },

    /// The menu was rendered.
    MenuRendered {
        /// Origin the state was computed for; `None` when the tab could
        /// not be resolved and the permissive default was rendered.
        origin: Option<Origin>,
        /// The rendered state.
        state: MenuState,
    },

    // ===== Toggle =====
    /// A checkbox toggle started.
    ToggleStarted {
        /// Origin being toggled.
        origin: Origin,
        /// Script whose checkbox was clicked.
        script: ScriptId,
        /// Checkbox state after the click (true = grant, false = revoke).
        checked: bool,
    },

    /// The user approved the permission prompt.
    PermissionGranted { origin: Origin },

    /// The user denied or dismissed the permission prompt.
    PermissionDenied { origin: Origin },

    /// A dynamic permission was removed.
    PermissionRevoked { origin: Origin },

    /// A content script was registered for an origin.
    ScriptRegistered { origin: Origin, script: ScriptId },

    /// The content script registration for an origin was removed.
    ScriptUnregistered { origin: Origin },

    /// A binding was persisted.
    BindingSaved { origin: Origin, script: ScriptId },

    /// A binding was removed from storage.
    BindingRemoved { origin: Origin },

    /// A tab was reloaded after a successful toggle.
    TabReloaded { tab: TabId },

    // ===== Startup =====
    /// Startup restoration finished.
    RestoreCompleted {
        /// Bindings re-registered successfully.
        restored: usize,
        /// Stored bindings whose permission was revoked out-of-band and
        /// which were therefore not re-registered.
        stale: usize,
    },
}

/// Observer of [`MenuEvent`]s.
///
/// # Example
///
/// ```ignore
/// use sitewire_core::{MenuEvent, MenuHook};
///
/// struct Logger;
///
/// impl MenuHook for Logger {
///     fn on_event(&self, event: &MenuEvent) {
///         println!("menu: {:?}", event);
///     }
/// }
///
/// controller.add_hook(Logger);
/// ```
pub trait MenuHook: Send + Sync {
    /// Called for every event, synchronously.
    fn on_event(&self, event: &MenuEvent);
}

impl<T: MenuHook + ?Sized> MenuHook for std::sync::Arc<T> {
    fn on_event(&self, event: &MenuEvent) {
        (**self).on_event(event);
    }
}
