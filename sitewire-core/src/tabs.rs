//! Tab events and the active-tab filter.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::menu::{MenuController, MenuState};

/// Identifies a browser tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Navigation status reported by tab-updated events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStatus {
    /// The tab is still navigating.
    Loading,
    /// The tab finished loading its document.
    Complete,
}

/// Errors raised by the tab host.
#[derive(Debug, thiserror::Error)]
pub enum TabError {
    /// The tab is closed, inaccessible, or has no URL.
    #[error("tab {0} could not be resolved")]
    Unresolvable(TabId),

    /// The platform tab API failed.
    #[error("tab host error: {0}")]
    Host(String),
}

/// The platform's tab API, as consumed by the core.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// URL currently loaded in `tab`.
    ///
    /// Fails with [`TabError::Unresolvable`] for closed tabs, tabs the
    /// extension may not read, and tabs without a URL.
    async fn tab_url(&self, tab: TabId) -> Result<String, TabError>;

    /// Reload `tab` so the page re-evaluates with the new injection state.
    async fn reload(&self, tab: TabId) -> Result<(), TabError>;
}

/// Tracks the active tab and drives menu refreshes from tab events.
///
/// Owns the process-wide "active tab" value. Single-writer policy: only
/// the watcher's event handlers write it; refresh filtering only reads
/// it. Updates for tabs that are no longer active are discarded so a
/// background navigation never repaints the menu for the wrong page.
pub struct TabWatcher {
    controller: Arc<MenuController>,
    active_tab: Mutex<Option<TabId>>,
}

impl TabWatcher {
    /// Create a watcher driving `controller`.
    pub fn new(controller: Arc<MenuController>) -> Self {
        Self {
            controller,
            active_tab: Mutex::new(None),
        }
    }

    /// The most recently activated tab, if any.
    pub fn active_tab(&self) -> Option<TabId> {
        *self.active_tab.lock()
    }

    /// Handle a tab-activated event: remember the tab and refresh the menu
    /// for it.
    pub async fn on_tab_activated(&self, tab: TabId) -> crate::Result<MenuState> {
        *self.active_tab.lock() = Some(tab);
        self.controller.refresh(tab).await
    }

    /// Handle a tab-updated event.
    ///
    /// Refreshes only when `tab` is the active tab and the navigation is
    /// complete; anything else is a stale or intermediate event and is
    /// dropped. Returns the rendered state, or `None` when the event was
    /// filtered out.
    pub async fn on_tab_updated(
        &self,
        tab: TabId,
        status: TabStatus,
    ) -> crate::Result<Option<MenuState>> {
        if self.active_tab() != Some(tab) || status != TabStatus::Complete {
            return Ok(None);
        }
        Ok(Some(self.controller.refresh(tab).await?))
    }
}
