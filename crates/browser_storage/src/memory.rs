//! In-memory media used by native builds and tests.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use chrono::{DateTime, Utc};

use crate::{
    backend::or_null_sentinel, cookie::validate_cookie_name, expiry::parse_optional_expiry,
    Clock, StorageBackend,
    StorageError, StoredEntries, SystemClock,
};

#[derive(Debug, Clone, Default)]
/// Key/value medium with local/session semantics: expiry is accepted but never enforced.
///
/// Clones share the same namespace.
pub struct MemoryStore {
    inner: Rc<RefCell<StoredEntries>>,
}

impl MemoryStore {
    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Drops every entry, as the browser does when a session ends.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

impl StorageBackend for MemoryStore {
    fn set(&self, name: &str, value: &str, _expires_at: Option<&str>) -> Result<(), StorageError> {
        self.inner
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, name: &str) -> Result<String, StorageError> {
        Ok(or_null_sentinel(self.inner.borrow().get(name).cloned()))
    }

    fn get_all(&self) -> Result<StoredEntries, StorageError> {
        Ok(self.inner.borrow().clone())
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().remove(name);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct JarCookie {
    value: String,
    expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
/// Cookie medium that enforces expiry against a [`Clock`], evicting lapsed cookies on access.
pub struct MemoryCookieJar<K = SystemClock> {
    cookies: Rc<RefCell<BTreeMap<String, JarCookie>>>,
    clock: K,
}

impl Default for MemoryCookieJar<SystemClock> {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<K: Clock> MemoryCookieJar<K> {
    /// Creates an empty jar that reads time from `clock`.
    pub fn with_clock(clock: K) -> Self {
        Self {
            cookies: Rc::new(RefCell::new(BTreeMap::new())),
            clock,
        }
    }

    fn evict_expired(&self) {
        let now = self.clock.now();
        self.cookies
            .borrow_mut()
            .retain(|_, cookie| cookie.expires.map_or(true, |expires| expires > now));
    }
}

impl<K: Clock> StorageBackend for MemoryCookieJar<K> {
    fn set(&self, name: &str, value: &str, expires_at: Option<&str>) -> Result<(), StorageError> {
        let expires = parse_optional_expiry(expires_at)?;
        validate_cookie_name(name)?;
        self.cookies.borrow_mut().insert(
            name.to_string(),
            JarCookie {
                value: value.to_string(),
                expires,
            },
        );
        self.evict_expired();
        Ok(())
    }

    fn get(&self, name: &str) -> Result<String, StorageError> {
        self.evict_expired();
        Ok(or_null_sentinel(
            self.cookies
                .borrow()
                .get(name)
                .map(|cookie| cookie.value.clone()),
        ))
    }

    fn get_all(&self) -> Result<StoredEntries, StorageError> {
        self.evict_expired();
        Ok(self
            .cookies
            .borrow()
            .iter()
            .map(|(name, cookie)| (name.clone(), cookie.value.clone()))
            .collect())
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        validate_cookie_name(name)?;
        self.cookies.borrow_mut().remove(name);
        Ok(())
    }
}
