//! Browser storage media.

pub mod cookies;
pub mod web_storage;
