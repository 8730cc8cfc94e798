//! Browser (`wasm32`) implementations of the [`browser_storage`] contracts.
//!
//! Media live under `storage/` (`document.cookie`, `localStorage`, `sessionStorage`); the
//! parent-frame host adapter and its message shapes live in `host` and `protocol`. On non-wasm
//! targets every adapter degrades to an inert stub so the workspace builds and tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Factories wiring browser media and the host into a component instance.
pub mod adapters;
pub mod host;
pub mod protocol;
pub mod storage;

pub use adapters::{
    web_storage_backends, web_storage_component, WebStorageBackends, WebStorageComponent,
};
pub use host::PostMessageHost;
pub use protocol::parse_render_message;
pub use storage::cookies::WebCookieStore;
pub use storage::web_storage::{WebLocalStorage, WebSessionStorage};
