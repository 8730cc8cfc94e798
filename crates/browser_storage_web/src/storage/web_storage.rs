//! `localStorage`/`sessionStorage`-backed media.
//!
//! Both media share one implementation over `web_sys::Storage`; neither enforces the expiry a
//! SET carries, the browser's own lifecycle decides persistence.

use browser_storage::{StorageBackend, StorageError, StoredEntries};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageArea {
    Local,
    Session,
}

impl StorageArea {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const fn medium(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn storage(self) -> Result<web_sys::Storage, StorageError> {
        let unavailable = || StorageError::Unavailable {
            medium: self.medium(),
        };
        let window = web_sys::window().ok_or_else(unavailable)?;
        let storage = match self {
            Self::Local => window.local_storage(),
            Self::Session => window.session_storage(),
        };
        storage
            .map_err(|err| medium_error(self, "open", err))?
            .ok_or_else(unavailable)
    }

    fn set(self, name: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .set_item(name, value)
                .map_err(|err| medium_error(self, "set_item", err))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (name, value);
            Ok(())
        }
    }

    fn get(self, name: &str) -> Result<Option<String>, StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .get_item(name)
                .map_err(|err| medium_error(self, "get_item", err))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = name;
            Ok(None)
        }
    }

    fn get_all(self) -> Result<StoredEntries, StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = self.storage()?;
            let length = storage
                .length()
                .map_err(|err| medium_error(self, "length", err))?;
            let mut entries = StoredEntries::new();
            for index in 0..length {
                let Some(name) = storage
                    .key(index)
                    .map_err(|err| medium_error(self, "key", err))?
                else {
                    continue;
                };
                if let Some(value) = storage
                    .get_item(&name)
                    .map_err(|err| medium_error(self, "get_item", err))?
                {
                    entries.insert(name, value);
                }
            }
            Ok(entries)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(StoredEntries::new())
        }
    }

    fn remove(self, name: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.storage()?
                .remove_item(name)
                .map_err(|err| medium_error(self, "remove_item", err))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = name;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn medium_error(
    area: StorageArea,
    operation: &'static str,
    err: wasm_bindgen::JsValue,
) -> StorageError {
    StorageError::Medium {
        medium: area.medium(),
        operation,
        detail: format!("{err:?}"),
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Local persistent medium backed by `window.localStorage`.
pub struct WebLocalStorage;

impl StorageBackend for WebLocalStorage {
    fn set(&self, name: &str, value: &str, _expires_at: Option<&str>) -> Result<(), StorageError> {
        StorageArea::Local.set(name, value)
    }

    fn get(&self, name: &str) -> Result<String, StorageError> {
        StorageArea::Local
            .get(name)
            .map(browser_storage::backend::or_null_sentinel)
    }

    fn get_all(&self) -> Result<StoredEntries, StorageError> {
        StorageArea::Local.get_all()
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        StorageArea::Local.remove(name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Session-scoped medium backed by `window.sessionStorage`.
pub struct WebSessionStorage;

impl StorageBackend for WebSessionStorage {
    fn set(&self, name: &str, value: &str, _expires_at: Option<&str>) -> Result<(), StorageError> {
        StorageArea::Session.set(name, value)
    }

    fn get(&self, name: &str) -> Result<String, StorageError> {
        StorageArea::Session
            .get(name)
            .map(browser_storage::backend::or_null_sentinel)
    }

    fn get_all(&self) -> Result<StoredEntries, StorageError> {
        StorageArea::Session.get_all()
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        StorageArea::Session.remove(name)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use browser_storage::NULL_SENTINEL;

    use super::*;

    #[test]
    fn native_stubs_behave_like_empty_media() {
        let media: [&dyn StorageBackend; 2] = [&WebLocalStorage, &WebSessionStorage];
        for medium in media {
            medium.set("k", "v", Some("2030-01-01")).expect("set");
            assert_eq!(medium.get("k").expect("get"), NULL_SENTINEL);
            assert!(medium.get_all().expect("get_all").is_empty());
            medium.delete("k").expect("delete");
        }
    }

    #[test]
    fn medium_names_match_browser_globals() {
        assert_eq!(StorageArea::Local.medium(), "localStorage");
        assert_eq!(StorageArea::Session.medium(), "sessionStorage");
    }
}
