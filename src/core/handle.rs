//! Session-scoped handles to in-memory image data.
//!
//! An [`ObjectUrl`] lets the front end display or download bytes without
//! re-reading the source file. Every URL must be revoked exactly once.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use serde::Serialize;
use tracing::warn;

/// URI scheme the desktop shell serves handles under.
pub const HANDLE_SCHEME: &str = "preview";

/// Opaque, session-unique reference to registered bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses a URL previously issued by a [`HandleRegistry`].
    pub fn parse(url: &str) -> Option<Self> {
        let id = url.strip_prefix(HANDLE_SCHEME)?.strip_prefix("://localhost/")?;
        id.parse::<u64>().ok()?;
        Some(Self(url.to_string()))
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct HandleEntry {
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

/// Issues and revokes [`ObjectUrl`]s.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    next_id: u64,
    live: HashMap<ObjectUrl, HandleEntry>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, mime_type: &str, bytes: Arc<[u8]>) -> ObjectUrl {
        self.next_id += 1;
        let url = ObjectUrl(format!("{HANDLE_SCHEME}://localhost/{}", self.next_id));
        self.live.insert(
            url.clone(),
            HandleEntry {
                mime_type: mime_type.to_string(),
                bytes,
            },
        );
        url
    }

    /// Releases a handle. Returns `false` if it was unknown or already revoked.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        let known = self.live.remove(url).is_some();
        if !known {
            warn!("Revoking unknown handle {url}");
        }
        known
    }

    pub fn resolve(&self, url: &ObjectUrl) -> Option<&HandleEntry> {
        self.live.get(url)
    }

    /// Number of handles issued and not yet revoked
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
