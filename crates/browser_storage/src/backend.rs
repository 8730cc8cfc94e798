//! The four-operation contract every storage medium implements, and the closed selector over
//! the three media.

use std::collections::BTreeMap;

use crate::{BackendKind, StorageError, NULL_SENTINEL};

/// Name-to-value mapping returned by [`StorageBackend::get_all`].
pub type StoredEntries = BTreeMap<String, String>;

/// Uniform capability surface over one storage medium.
///
/// Implementations are synchronous. Missing keys are never errors: [`get`](Self::get) returns
/// [`NULL_SENTINEL`] and [`delete`](Self::delete) succeeds regardless of prior existence.
pub trait StorageBackend {
    /// Writes `value` under `name`. `expires_at` is an unparsed host timestamp; media without
    /// native expiry accept and ignore it.
    fn set(&self, name: &str, value: &str, expires_at: Option<&str>) -> Result<(), StorageError>;

    /// Reads the value under `name`, or [`NULL_SENTINEL`] when absent.
    fn get(&self, name: &str) -> Result<String, StorageError>;

    /// Reads every entry in this backend's namespace.
    fn get_all(&self) -> Result<StoredEntries, StorageError>;

    /// Removes the entry under `name`.
    fn delete(&self, name: &str) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn set(&self, name: &str, value: &str, expires_at: Option<&str>) -> Result<(), StorageError> {
        (**self).set(name, value, expires_at)
    }

    fn get(&self, name: &str) -> Result<String, StorageError> {
        (**self).get(name)
    }

    fn get_all(&self) -> Result<StoredEntries, StorageError> {
        (**self).get_all()
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        (**self).delete(name)
    }
}

/// Maps an optional lookup onto the sentinel-encoded contract value.
pub fn or_null_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| NULL_SENTINEL.to_string())
}

/// The three media a component instance can reach, one per [`BackendKind`].
#[derive(Debug, Clone, Default)]
pub struct StorageBackends<C, L, S> {
    /// Cookie-backed medium.
    pub cookie: C,
    /// Local persistent medium.
    pub local: L,
    /// Session-scoped medium.
    pub session: S,
}

impl<C, L, S> StorageBackends<C, L, S>
where
    C: StorageBackend,
    L: StorageBackend,
    S: StorageBackend,
{
    /// Bundles the three media.
    pub fn new(cookie: C, local: L, session: S) -> Self {
        Self {
            cookie,
            local,
            session,
        }
    }

    /// Selects the medium for `kind`.
    pub fn select(&self, kind: BackendKind) -> SelectedBackend<'_, C, L, S> {
        match kind {
            BackendKind::Cookie => SelectedBackend::Cookie(&self.cookie),
            BackendKind::LocalPersistent => SelectedBackend::LocalPersistent(&self.local),
            BackendKind::SessionScoped => SelectedBackend::SessionScoped(&self.session),
        }
    }
}

/// Borrowed handle to one selected medium; forwards the contract to the chosen variant.
#[derive(Debug, Clone, Copy)]
pub enum SelectedBackend<'a, C, L, S> {
    /// Cookie-backed medium.
    Cookie(&'a C),
    /// Local persistent medium.
    LocalPersistent(&'a L),
    /// Session-scoped medium.
    SessionScoped(&'a S),
}

impl<C, L, S> SelectedBackend<'_, C, L, S> {
    /// Kind of the selected medium.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Cookie(_) => BackendKind::Cookie,
            Self::LocalPersistent(_) => BackendKind::LocalPersistent,
            Self::SessionScoped(_) => BackendKind::SessionScoped,
        }
    }
}

impl<C, L, S> StorageBackend for SelectedBackend<'_, C, L, S>
where
    C: StorageBackend,
    L: StorageBackend,
    S: StorageBackend,
{
    fn set(&self, name: &str, value: &str, expires_at: Option<&str>) -> Result<(), StorageError> {
        match self {
            Self::Cookie(store) => store.set(name, value, expires_at),
            Self::LocalPersistent(store) => store.set(name, value, expires_at),
            Self::SessionScoped(store) => store.set(name, value, expires_at),
        }
    }

    fn get(&self, name: &str) -> Result<String, StorageError> {
        match self {
            Self::Cookie(store) => store.get(name),
            Self::LocalPersistent(store) => store.get(name),
            Self::SessionScoped(store) => store.get(name),
        }
    }

    fn get_all(&self) -> Result<StoredEntries, StorageError> {
        match self {
            Self::Cookie(store) => store.get_all(),
            Self::LocalPersistent(store) => store.get_all(),
            Self::SessionScoped(store) => store.get_all(),
        }
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        match self {
            Self::Cookie(store) => store.delete(name),
            Self::LocalPersistent(store) => store.delete(name),
            Self::SessionScoped(store) => store.delete(name),
        }
    }
}
