//! Host permission checks, grants, and revocations.
//!
//! The [`PermissionGate`] answers one question per origin: is access
//! already granted statically by the manifest, granted dynamically by a
//! prior user approval, or not granted at all? Static and dynamic access
//! are checked in that order and are mutually exclusive for menu
//! purposes - an origin covered by the manifest never consults dynamic
//! state, and its menu is shown disabled.

use std::sync::Arc;

use async_trait::async_trait;

use crate::origin::{Origin, OriginError};

/// Errors raised by the permission host.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    /// The platform permission API failed.
    #[error("permission host error: {0}")]
    Host(String),
}

/// The platform's permission API, as consumed by the gate.
///
/// Implemented by the host environment (the browser's `permissions`
/// API in production, mocks in tests).
#[async_trait]
pub trait PermissionHost: Send + Sync {
    /// Origin patterns declared in the manifest's static permission list.
    async fn manifest_origins(&self) -> Result<Vec<String>, PermissionError>;

    /// Origin patterns granted dynamically by the user after install.
    async fn granted_origins(&self) -> Result<Vec<String>, PermissionError>;

    /// Prompt the user to grant `pattern`.
    ///
    /// Resolves `false` on denial or dismissal - the two are
    /// indistinguishable to the caller.
    async fn request_origin(&self, pattern: &str) -> Result<bool, PermissionError>;

    /// Remove a dynamically granted `pattern`.
    ///
    /// Removing a pattern that was never granted is not an error and
    /// resolves `true`, so revocation stays idempotent.
    async fn remove_origin(&self, pattern: &str) -> Result<bool, PermissionError>;
}

/// Decides and mutates per-origin access state.
pub struct PermissionGate {
    host: Arc<dyn PermissionHost>,
}

impl PermissionGate {
    /// Create a gate over a permission host.
    pub fn new(host: Arc<dyn PermissionHost>) -> Self {
        Self { host }
    }

    /// True if the install-time permission set already covers `origin`.
    ///
    /// The menu must then be fully disabled: the user has no choice to
    /// make for this origin.
    pub async fn has_static_access(&self, origin: &Origin) -> Result<bool, PermissionError> {
        let origin_str = origin.to_string();
        let manifest = self.host.manifest_origins().await?;
        Ok(manifest.iter().any(|p| p.starts_with(origin_str.as_str())))
    }

    /// True if a previously user-granted, revocable permission exists for
    /// exactly `origin/*`.
    pub async fn has_dynamic_access(&self, origin: &Origin) -> Result<bool, PermissionError> {
        let pattern = origin.match_pattern();
        let granted = self.host.granted_origins().await?;
        Ok(granted.iter().any(|p| p == &pattern))
    }

    /// All origins currently holding a dynamic grant.
    ///
    /// Patterns that do not parse back into an origin are skipped; they
    /// cannot correspond to a binding this extension created.
    pub async fn dynamic_origins(&self) -> Result<Vec<Origin>, PermissionError> {
        let granted = self.host.granted_origins().await?;
        Ok(granted
            .iter()
            .filter_map(|p| pattern_origin(p).ok())
            .collect())
    }

    /// Trigger the platform permission prompt for `origin`.
    ///
    /// `Ok(false)` means the user denied or dismissed the prompt; no side
    /// effects have taken place.
    pub async fn request_dynamic_access(&self, origin: &Origin) -> Result<bool, PermissionError> {
        self.host.request_origin(&origin.match_pattern()).await
    }

    /// Remove a previously granted permission for `origin`. Idempotent.
    pub async fn revoke_dynamic_access(&self, origin: &Origin) -> Result<bool, PermissionError> {
        self.host.remove_origin(&origin.match_pattern()).await
    }
}

/// Recover the origin from a granted `scheme://host/*` pattern.
fn pattern_origin(pattern: &str) -> Result<Origin, OriginError> {
    Origin::parse(pattern.trim_end_matches("/*"))
}
