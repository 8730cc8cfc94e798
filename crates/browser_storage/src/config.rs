//! Runtime configuration: per-medium write limits and component rendering options.

use serde::{Deserialize, Serialize};

use crate::BackendKind;

/// Write limits the storage client enforces before sending a SET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLimits {
    /// Maximum number of distinct names.
    pub max_entries_count: usize,
    /// Maximum byte size of `name` plus encoded value.
    pub max_entry_size: usize,
}

impl StorageLimits {
    /// Cookie jar limits (per-cookie size cap browsers enforce).
    pub const COOKIE: Self = Self {
        max_entries_count: 50,
        max_entry_size: 4096,
    };

    /// `localStorage` / `sessionStorage` limits.
    pub const WEB_STORAGE: Self = Self {
        max_entries_count: 1000,
        max_entry_size: 5120,
    };

    /// Default limits for `kind`.
    pub const fn for_backend(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Cookie => Self::COOKIE,
            BackendKind::LocalPersistent | BackendKind::SessionScoped => Self::WEB_STORAGE,
        }
    }
}

/// Rendering options for one component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Fixed frame height in pixels; `None` lets the host measure the document.
    #[serde(default)]
    pub frame_height: Option<u32>,
}
