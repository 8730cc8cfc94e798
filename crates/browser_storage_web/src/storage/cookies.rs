//! `document.cookie`-backed medium.
//!
//! Every write and removal is scoped to path `/` with `SameSite=Strict`; the expiry carried by a
//! SET becomes the cookie's `Expires` attribute.

use browser_storage::{
    backend::or_null_sentinel,
    cookie::{format_remove_cookie, format_set_cookie, parse_cookie_header},
    parse_optional_expiry, StorageBackend, StorageError, StoredEntries,
};
#[cfg(target_arch = "wasm32")]
use browser_storage::cookie::COOKIE_MEDIUM;

#[derive(Debug, Clone, Copy, Default)]
/// Cookie medium backed by the page's `document.cookie`.
pub struct WebCookieStore;

impl WebCookieStore {
    #[cfg(target_arch = "wasm32")]
    fn document() -> Result<web_sys::HtmlDocument, StorageError> {
        use wasm_bindgen::JsCast;

        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
            .ok_or(StorageError::Unavailable { medium: COOKIE_MEDIUM })
    }

    fn read_header(self) -> Result<String, StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::document()?
                .cookie()
                .map_err(|err| StorageError::Medium {
                    medium: COOKIE_MEDIUM,
                    operation: "read",
                    detail: format!("{err:?}"),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(String::new())
        }
    }

    fn write_assignment(self, assignment: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::document()?
                .set_cookie(assignment)
                .map_err(|err| StorageError::Medium {
                    medium: COOKIE_MEDIUM,
                    operation: "write",
                    detail: format!("{err:?}"),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = assignment;
            Ok(())
        }
    }
}

impl StorageBackend for WebCookieStore {
    fn set(&self, name: &str, value: &str, expires_at: Option<&str>) -> Result<(), StorageError> {
        let expires = parse_optional_expiry(expires_at)?;
        self.write_assignment(&format_set_cookie(name, value, expires)?)
    }

    fn get(&self, name: &str) -> Result<String, StorageError> {
        let mut cookies = parse_cookie_header(&self.read_header()?);
        Ok(or_null_sentinel(cookies.remove(name)))
    }

    fn get_all(&self) -> Result<StoredEntries, StorageError> {
        Ok(parse_cookie_header(&self.read_header()?))
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.write_assignment(&format_remove_cookie(name)?)
    }
}
