//! Storage-command contracts shared by the browser component and its embedding host.
//!
//! This crate is the host-neutral core: the command descriptor, the four-operation backend
//! contract and its closed selector over cookie, local and session media, the dispatcher, and
//! the deduplicating result publisher. Browser media live in `browser_storage_web`; the typed
//! client in [`client`] is what an embedding application uses to issue commands.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod backend;
pub mod client;
pub mod command;
pub mod component;
pub mod config;
pub mod cookie;
pub mod dispatcher;
pub mod error;
pub mod expiry;
pub mod host;
pub mod memory;
pub mod publisher;
pub mod time;

pub use backend::{SelectedBackend, StorageBackend, StorageBackends, StoredEntries};
pub use client::{ClientError, CommandTransport, DirectTransport, StorageClient, StoredValue};
pub use command::{Action, BackendKind, CommandDescriptor, NULL_SENTINEL};
pub use component::BrowserStorageComponent;
pub use config::{ComponentConfig, StorageLimits};
pub use dispatcher::{CommandOutput, Dispatcher};
pub use error::StorageError;
pub use expiry::{parse_expiry, parse_optional_expiry};
pub use host::{ComponentHost, HostEvent, NoopHost, RecordingHost};
pub use memory::{MemoryCookieJar, MemoryStore};
pub use publisher::{PublishOutcome, ResultPublisher};
pub use time::{Clock, ManualClock, SystemClock};
