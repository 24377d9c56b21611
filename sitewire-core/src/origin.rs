//! Origin derivation from page URLs.
//!
//! An [`Origin`] is the unit of permission and binding granularity:
//! scheme plus hostname, with no port, path, or query. Host permissions
//! and content script match patterns are both expressed as `origin/*`.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Errors raised while deriving an origin from a URL.
#[derive(Debug, thiserror::Error)]
pub enum OriginError {
    /// The URL could not be parsed at all.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL parsed but carries no hostname (e.g. `about:blank`).
    /// Such pages cannot hold a host permission.
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// The URL uses a scheme other than http/https. Browser-internal
    /// pages (`chrome://`, `moz-extension://`) can never be toggled.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// A web origin: scheme + hostname, nothing else.
///
/// Derived from a page URL by stripping path, query, and port. Match
/// patterns deliberately exclude the port number, so two URLs differing
/// only by port collapse into the same origin.
///
/// # Example
///
/// ```rust
/// use sitewire_core::Origin;
///
/// let origin = Origin::parse("https://github.com:8080/rust-lang/rust?tab=readme").unwrap();
/// assert_eq!(origin.to_string(), "https://github.com");
/// assert_eq!(origin.match_pattern(), "https://github.com/*");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Origin {
    scheme: String,
    host: String,
}

impl Origin {
    /// Derive the origin from a full page URL.
    ///
    /// Fails for URLs that cannot be parsed, that have no hostname, or
    /// that are not plain http/https pages (browser-internal URLs, data
    /// URLs, and the like).
    pub fn parse(url: &str) -> Result<Self, OriginError> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(OriginError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        let host = parsed
            .host_str()
            .ok_or_else(|| OriginError::MissingHost(url.to_string()))?;
        Ok(Self {
            scheme: parsed.scheme().to_string(),
            host: host.to_string(),
        })
    }

    /// The URL scheme, e.g. `https`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The hostname, e.g. `github.com`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The host permission / content script match pattern for this origin:
    /// `scheme://host/*`.
    pub fn match_pattern(&self) -> String {
        format!("{}/*", self)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

impl TryFrom<String> for Origin {
    type Error = OriginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Origin::parse(&value)
    }
}

impl From<Origin> for String {
    fn from(origin: Origin) -> Self {
        origin.to_string()
    }
}
