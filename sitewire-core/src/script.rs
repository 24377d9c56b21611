//! The bundled page-integration scripts and their menu wiring.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Menu item id of the parent "Treat this origin as" entry.
pub const MENU_PARENT_ID: &str = "sitewire-toggle-origin-parent";

/// Identifies one of the three bundled page-integration scripts.
///
/// Each id maps to a checkbox in the browser action menu, a bundled
/// script file, and the storage value persisted for a bound origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScriptId {
    Github,
    Gitlab,
    Bitbucket,
}

impl ScriptId {
    /// All script ids, in menu order.
    pub const ALL: [ScriptId; 3] = [ScriptId::Github, ScriptId::Gitlab, ScriptId::Bitbucket];

    /// The storage value for this script, e.g. `"GITHUB"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptId::Github => "GITHUB",
            ScriptId::Gitlab => "GITLAB",
            ScriptId::Bitbucket => "BITBUCKET",
        }
    }

    /// Checkbox title shown in the menu.
    pub fn title(&self) -> &'static str {
        match self {
            ScriptId::Github => "github.com",
            ScriptId::Gitlab => "gitlab.com",
            ScriptId::Bitbucket => "bitbucket.org",
        }
    }

    /// Menu item id of this script's checkbox.
    pub fn menu_item_id(&self) -> &'static str {
        match self {
            ScriptId::Github => "sitewire-toggle-origin-github",
            ScriptId::Gitlab => "sitewire-toggle-origin-gitlab",
            ScriptId::Bitbucket => "sitewire-toggle-origin-bitbucket",
        }
    }

    /// Map a clicked menu item id back to its script.
    ///
    /// Returns `None` for the parent item and any id the menu does not own,
    /// which callers treat as "ignore the click".
    pub fn for_menu_item(item_id: &str) -> Option<ScriptId> {
        ScriptId::ALL
            .into_iter()
            .find(|s| s.menu_item_id() == item_id)
    }

    /// Bundled script file injected for this id, unless overridden through
    /// the catalog.
    pub fn default_file(&self) -> &'static str {
        match self {
            ScriptId::Github => "sitewire-github.js",
            ScriptId::Gitlab => "sitewire-gitlab.js",
            ScriptId::Bitbucket => "sitewire-bitbucket.js",
        }
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a storage value does not name a known script.
#[derive(Debug, thiserror::Error)]
#[error("unknown script id: {0}")]
pub struct ParseScriptIdError(String);

impl FromStr for ScriptId {
    type Err = ParseScriptIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GITHUB" => Ok(ScriptId::Github),
            "GITLAB" => Ok(ScriptId::Gitlab),
            "BITBUCKET" => Ok(ScriptId::Bitbucket),
            other => Err(ParseScriptIdError(other.to_string())),
        }
    }
}

/// Maps script ids to the script files the host injects.
///
/// Defaults to the bundled files; individual entries can be overridden
/// through [`MenuControllerBuilder::with_script_file`].
///
/// [`MenuControllerBuilder::with_script_file`]: crate::menu::MenuControllerBuilder::with_script_file
#[derive(Debug, Clone)]
pub struct ScriptCatalog {
    overrides: HashMap<ScriptId, String>,
}

impl ScriptCatalog {
    /// Catalog with the default bundled files.
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Override the injected file for one script id.
    pub fn set_file(&mut self, id: ScriptId, file: impl Into<String>) {
        self.overrides.insert(id, file.into());
    }

    /// File injected for `id`.
    pub fn file_for(&self, id: ScriptId) -> &str {
        self.overrides
            .get(&id)
            .map(String::as_str)
            .unwrap_or_else(|| id.default_file())
    }
}

impl Default for ScriptCatalog {
    fn default() -> Self {
        Self::new()
    }
}
