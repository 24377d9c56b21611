//! Menu refresh: tab → URL → origin → derived state → atomic render.

use crate::events::MenuEvent;
use crate::menu::{MenuController, MenuState};
use crate::origin::Origin;
use crate::tabs::TabId;

impl MenuController {
    /// Recompute and render the menu for `tab`.
    ///
    /// When the tab cannot be resolved (closed, no URL, privileged page)
    /// the menu falls back to the [`MenuState::Unbound`] rendering - a
    /// deliberately permissive default so the menu is never stuck showing
    /// a stale bound state for a different page.
    ///
    /// Returns the rendered state.
    pub async fn refresh(&self, tab: TabId) -> crate::Result<MenuState> {
        self.emit_event(MenuEvent::RefreshStarted { tab });

        let origin = match self.tabs.tab_url(tab).await {
            Ok(url) => Origin::parse(&url).ok(),
            Err(_) => None,
        };
        let state = match &origin {
            Some(origin) => self.resolve_state(origin).await?,
            None => MenuState::Unbound,
        };

        self.surface.render(state).await;
        self.emit_event(MenuEvent::MenuRendered { origin, state });
        Ok(state)
    }

    /// Derive the menu state for `origin` from current truth.
    ///
    /// Static access wins and locks the menu; dynamic state is never
    /// consulted for a statically covered origin. With dynamic access,
    /// the stored binding picks the checked box. A granted permission
    /// with no readable binding is an inconsistency rendered as
    /// [`MenuState::Unbound`] and healed by the next successful toggle,
    /// not auto-repaired here.
    pub(super) async fn resolve_state(&self, origin: &Origin) -> crate::Result<MenuState> {
        if self.gate.has_static_access(origin).await? {
            return Ok(MenuState::StaticLocked);
        }
        if !self.gate.has_dynamic_access(origin).await? {
            return Ok(MenuState::Unbound);
        }
        match self.store.get(origin).await {
            Ok(Some(binding)) => Ok(MenuState::Bound(binding.script)),
            Ok(None) | Err(_) => Ok(MenuState::Unbound),
        }
    }
}
