//! # Sitewire
//!
//! The background core of a browser extension that lets a user opt a
//! specific web origin into having one of several bundled page-integration
//! scripts injected, by toggling a checkbox in the browser action's
//! context menu.
//!
//! Toggling a checkbox grants or revokes a host permission for the
//! origin, registers or unregisters the matching content script, persists
//! the origin → script binding so it survives restarts, and reloads the
//! tab. The crate's job is keeping three independent pieces of truth
//! consistent: the browser's granted-permission set, the set of live
//! dynamic script registrations, and the persisted binding map.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use sitewire_core::{MenuClick, MenuController, TabWatcher};
//!
//! // The four host interfaces are implemented against the browser's
//! // extension APIs (permissions, scripting, tabs, contextMenus).
//! let controller = Arc::new(
//!     MenuController::builder()
//!         .permission_host(permissions)
//!         .script_host(scripts)
//!         .tab_host(tabs)
//!         .surface(menu)
//!         .store(Arc::new(FileBindingStore::new(bindings_path)))
//!         .build()?,
//! );
//!
//! // Re-register persisted bindings that still hold a permission.
//! controller.restore_registrations().await?;
//!
//! // Wire platform events.
//! let watcher = TabWatcher::new(controller.clone());
//! watcher.on_tab_activated(tab_id).await?;
//! controller.handle_toggle(click).await?;
//! ```
//!
//! ## Components
//!
//! - **[`PermissionGate`]**: static (manifest) vs dynamic (user-granted)
//!   access decisions per origin
//! - **[`ContentScriptRegistry`]**: at most one live script registration
//!   per origin, replace-not-stack
//! - **[`BindingStore`]**: persisted origin → script bindings
//!   ([`MemoryBindingStore`], [`FileBindingStore`])
//! - **[`MenuController`]**: derives and renders [`MenuState`], drives
//!   toggles end to end
//! - **[`TabWatcher`]**: active-tab tracking, stale-event filtering
//!
//! ## Execution model
//!
//! Single-threaded and cooperative: every operation is an async request
//! to the host runtime, sequenced with plain `.await`. Within one toggle
//! the steps run strictly in order (permission → registration →
//! persistence → reload). Concurrent toggles on one origin are not
//! serialized; the registry's handle replacement and the store's
//! per-origin overwrite make the last writer win.

pub mod binding;
pub mod error;
pub mod events;
pub mod menu;
pub mod origin;
pub mod permission;
pub mod registry;
pub mod script;
pub mod store;
pub mod tabs;

pub use binding::ScriptBinding;
pub use error::{Error, Result};
pub use events::{MenuEvent, MenuHook};
pub use menu::{
    MenuClick, MenuController, MenuControllerBuilder, MenuState, MenuSurface, RestoreOutcome,
};
pub use origin::{Origin, OriginError};
pub use permission::{PermissionError, PermissionGate, PermissionHost};
pub use registry::{
    ContentScriptRegistry, RegistrationHandle, RegistrationRequest, RegistryError, ScriptHost,
};
pub use script::{ParseScriptIdError, ScriptCatalog, ScriptId, MENU_PARENT_ID};
pub use store::{BindingStore, BindingStoreError, FileBindingStore, MemoryBindingStore};
pub use tabs::{TabError, TabHost, TabId, TabStatus, TabWatcher};
