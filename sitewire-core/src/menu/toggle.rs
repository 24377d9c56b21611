//! Checkbox toggles and startup restoration.
//!
//! A toggle runs one strictly sequential chain: request/revoke the
//! permission, register/unregister the script, persist the binding,
//! reload the tab. Every failure is terminal for that user action; no
//! step is retried. A second toggle for the same origin started before
//! the first completes is resolved last-writer-wins by the registry's
//! handle replacement and the store's per-origin overwrite.

use crate::binding::ScriptBinding;
use crate::events::MenuEvent;
use crate::menu::{MenuClick, MenuController, RestoreOutcome};
use crate::origin::Origin;
use crate::script::ScriptId;
use crate::tabs::TabId;

impl MenuController {
    /// Handle a click on a menu item.
    ///
    /// Clicks on anything but the three script checkboxes are ignored.
    /// Clicks for statically covered origins, and clicks on pages whose
    /// URL yields no origin, trigger only a refresh - they can occur when
    /// the rendered menu was stale (e.g. the extension was disabled until
    /// its menu was clicked) and never mutate permissions or storage.
    pub async fn handle_toggle(&self, click: MenuClick) -> crate::Result<()> {
        let Some(script) = ScriptId::for_menu_item(&click.item_id) else {
            return Ok(());
        };

        let origin = match click.url.as_deref().map(Origin::parse) {
            Some(Ok(origin)) => origin,
            _ => {
                self.refresh(click.tab).await?;
                return Ok(());
            }
        };

        if self.gate.has_static_access(&origin).await? {
            self.refresh(click.tab).await?;
            return Ok(());
        }

        self.emit_event(MenuEvent::ToggleStarted {
            origin: origin.clone(),
            script,
            checked: click.checked,
        });

        if click.checked {
            self.grant(origin, script, click.tab).await
        } else {
            self.revoke(origin, click.tab).await
        }
    }

    /// Grant path: permission prompt → register script → persist binding
    /// → reload tab.
    async fn grant(&self, origin: Origin, script: ScriptId, tab: TabId) -> crate::Result<()> {
        if !self.gate.request_dynamic_access(&origin).await? {
            self.emit_event(MenuEvent::PermissionDenied {
                origin: origin.clone(),
            });
            self.revert(&origin).await?;
            return Ok(());
        }
        self.emit_event(MenuEvent::PermissionGranted {
            origin: origin.clone(),
        });

        // A registration failure is terminal for this toggle. The granted
        // permission stays in place; there is no compensating revoke.
        self.registry
            .write()
            .await
            .register(origin.clone(), script)
            .await?;
        self.emit_event(MenuEvent::ScriptRegistered {
            origin: origin.clone(),
            script,
        });

        self.store
            .put(ScriptBinding::new(origin.clone(), script))
            .await?;
        self.emit_event(MenuEvent::BindingSaved { origin, script });

        self.reload(tab).await
    }

    /// Revoke path: remove permission → unregister script → remove
    /// binding → reload tab.
    async fn revoke(&self, origin: Origin, tab: TabId) -> crate::Result<()> {
        if !self.gate.revoke_dynamic_access(&origin).await? {
            self.revert(&origin).await?;
            return Ok(());
        }
        self.emit_event(MenuEvent::PermissionRevoked {
            origin: origin.clone(),
        });

        if self.registry.write().await.unregister(&origin).await? {
            self.emit_event(MenuEvent::ScriptUnregistered {
                origin: origin.clone(),
            });
        }

        if self.store.remove(&origin).await? {
            self.emit_event(MenuEvent::BindingRemoved { origin });
        }

        self.reload(tab).await
    }

    /// Reload the tab so the page re-evaluates with the new injection
    /// state. Unconditional on toggle success.
    async fn reload(&self, tab: TabId) -> crate::Result<()> {
        self.tabs.reload(tab).await?;
        self.emit_event(MenuEvent::TabReloaded { tab });
        Ok(())
    }

    /// Re-render current truth for `origin`, undoing the optimistic
    /// checkbox flip the platform applied on click.
    async fn revert(&self, origin: &Origin) -> crate::Result<()> {
        let state = self.resolve_state(origin).await?;
        self.surface.render(state).await;
        self.emit_event(MenuEvent::MenuRendered {
            origin: Some(origin.clone()),
            state,
        });
        Ok(())
    }

    /// Repopulate the registry from persisted bindings on process start.
    ///
    /// Only bindings whose origin still holds a dynamic permission are
    /// re-registered. Bindings whose permission was revoked out-of-band
    /// (e.g. through the browser's own permissions UI) are counted as
    /// stale and silently skipped; the store entry is corrected lazily by
    /// the next toggle for that origin, never here.
    pub async fn restore_registrations(&self) -> crate::Result<RestoreOutcome> {
        let total = self.store.all().await?.len();
        let granted = self.gate.dynamic_origins().await?;
        let bindings = self.store.get_many(&granted).await?;

        let mut registry = self.registry.write().await;
        let mut restored = 0;
        for binding in &bindings {
            if registry
                .register(binding.origin.clone(), binding.script)
                .await
                .is_ok()
            {
                restored += 1;
            }
        }

        let outcome = RestoreOutcome {
            restored,
            stale: total.saturating_sub(bindings.len()),
        };
        self.emit_event(MenuEvent::RestoreCompleted {
            restored: outcome.restored,
            stale: outcome.stale,
        });
        Ok(outcome)
    }
}
