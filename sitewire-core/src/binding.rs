//! Persisted origin → script bindings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::origin::Origin;
use crate::script::ScriptId;

/// A persisted decision to inject one script into one origin.
///
/// At most one binding exists per origin. A binding is expected to exist
/// exactly when a dynamic host permission for the origin is granted and
/// the registry holds a live registration; divergence is tolerated only
/// transiently, inside a single toggle operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptBinding {
    /// The origin the script is injected into.
    pub origin: Origin,

    /// Which bundled script is injected.
    pub script: ScriptId,

    /// When the user made this choice.
    pub created_at: DateTime<Utc>,
}

impl ScriptBinding {
    /// Create a binding stamped with the current time.
    pub fn new(origin: Origin, script: ScriptId) -> Self {
        Self {
            origin,
            script,
            created_at: Utc::now(),
        }
    }
}

impl PartialEq for ScriptBinding {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.script == other.script
    }
}

impl Eq for ScriptBinding {}
