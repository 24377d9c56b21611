//! Derived menu state and click input.

use crate::script::ScriptId;
use crate::tabs::TabId;

/// The menu's derived per-origin state.
///
/// Computed once per refresh from the permission gate and binding store,
/// rendered atomically, and never cached beyond a single render. The
/// three checkbox flags and the parent-enabled flag all derive from one
/// value, so partial-update races cannot occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// The manifest already covers the origin; the user has no choice to
    /// make. Parent disabled, checkboxes meaningless.
    StaticLocked,

    /// No script bound to the origin. Parent enabled, all checkboxes
    /// cleared. Also the permissive default when the tab cannot be
    /// resolved.
    Unbound,

    /// Exactly one script bound to the origin.
    Bound(ScriptId),
}

impl MenuState {
    /// Whether the parent menu item is enabled.
    pub fn parent_enabled(&self) -> bool {
        !matches!(self, MenuState::StaticLocked)
    }

    /// Whether the checkbox for `script` is checked.
    pub fn checked(&self, script: ScriptId) -> bool {
        matches!(self, MenuState::Bound(bound) if *bound == script)
    }
}

/// A click on a menu item, as delivered by the platform.
#[derive(Debug, Clone)]
pub struct MenuClick {
    /// Raw id of the clicked item. Ids that are not one of the three
    /// script checkboxes are ignored.
    pub item_id: String,

    /// Checkbox state after the platform's optimistic flip:
    /// `true` asks for a grant, `false` for a revocation.
    pub checked: bool,

    /// The tab the menu was opened on.
    pub tab: TabId,

    /// URL of that tab, if the platform handed one over. `None` or an
    /// unparseable URL (privileged pages) downgrades the click to a
    /// plain refresh.
    pub url: Option<String>,
}

/// Counts from startup registration restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// Bindings re-registered successfully.
    pub restored: usize,

    /// Stored bindings skipped because their permission was revoked
    /// out-of-band. They stay in the store until the next toggle for
    /// their origin overwrites or removes them.
    pub stale: usize,
}
