//! Typed client the embedding application uses to drive a storage component.
//!
//! The client layers JSON values, time-to-live and write validation on top of the raw
//! string commands the component understands.

mod codec;
mod transport;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codec::{decode_value, encode_value};
pub use transport::{CommandTransport, DirectTransport};

use crate::{
    Action, BackendKind, Clock, CommandDescriptor, StorageError, StorageLimits, SystemClock,
};

/// Prefix of the widget key attached to every command.
pub const WIDGET_KEY_PREFIX: &str = "browser_storage";

/// Failures surfaced by [`StorageClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// `name` was empty.
    #[error("One must provide non-empty `name`")]
    EmptyName,

    /// `value` was null or empty.
    #[error("One must provide non-empty `value` otherwise just delete that specific entry")]
    EmptyValue,

    /// `value` could not be turned into JSON.
    #[error("One must provide JSON-serializable `value`: {0}")]
    NotSerializable(String),

    /// Writing a new name would exceed the entry count limit.
    #[error("Allowed maximum number of {max} `names` has been exceeded. Remove some before adding more")]
    TooManyEntries {
        /// Configured limit.
        max: usize,
    },

    /// `name` plus encoded value exceed the size limit.
    #[error("`name` and `value` combined bytes size exceeded allowed maximum {max} bytes")]
    EntryTooLarge {
        /// Configured limit in bytes.
        max: usize,
    },

    /// The component returned something that is not the expected JSON shape.
    #[error("unexpected component response: {0}")]
    Decode(String),

    /// The medium or host failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A stored value together with its expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredValue {
    /// Decoded JSON value.
    pub value: Value,
    /// Expiry instant, when the value was written with a time-to-live.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Typed handle on one backend of a storage component.
#[derive(Debug)]
pub struct StorageClient<T, K = SystemClock> {
    transport: T,
    backend: BackendKind,
    limits: StorageLimits,
    clock: K,
    call_counts: HashMap<String, u64>,
}

impl<T: CommandTransport> StorageClient<T, SystemClock> {
    /// Creates a client for `backend` with that backend's default limits and the wall clock.
    pub fn new(transport: T, backend: BackendKind) -> Self {
        Self {
            transport,
            backend,
            limits: StorageLimits::for_backend(backend),
            clock: SystemClock,
            call_counts: HashMap::new(),
        }
    }
}

impl<T: CommandTransport, K: Clock> StorageClient<T, K> {
    /// Replaces the write limits.
    pub fn with_limits(mut self, limits: StorageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the clock used for time-to-live and expiry checks.
    pub fn with_clock<K2: Clock>(self, clock: K2) -> StorageClient<T, K2> {
        StorageClient {
            transport: self.transport,
            backend: self.backend,
            limits: self.limits,
            clock,
            call_counts: self.call_counts,
        }
    }

    /// Backend this client targets.
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Transport this client sends through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Stores `value` under `name`, expiring after `ttl` when given.
    ///
    /// # Errors
    ///
    /// Returns validation errors before anything is sent, and transport errors afterwards.
    pub fn set<V: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &V,
        ttl: Option<Duration>,
    ) -> Result<(), ClientError> {
        let expires_at = ttl.map(|ttl| self.clock.now() + ttl);
        let encoded = self.validate(name, value, expires_at)?;

        let mut command = CommandDescriptor::new(self.backend, Action::Set)
            .with_name(name)
            .with_value(encoded);
        command.expires_at =
            expires_at.map(|instant| instant.to_rfc3339_opts(SecondsFormat::Secs, false));
        self.send(command)?;
        Ok(())
    }

    /// Reads the value under `name`, after dropping expired entries.
    ///
    /// # Errors
    ///
    /// Returns transport and decode errors.
    pub fn get(&mut self, name: &str) -> Result<Option<Value>, ClientError> {
        self.delete_expired()?;
        Ok(self.get_with_expiry(name)?.map(|stored| stored.value))
    }

    /// Reads and deserializes the value under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the stored JSON does not fit `V`.
    pub fn get_as<V: DeserializeOwned>(&mut self, name: &str) -> Result<Option<V>, ClientError> {
        self.get(name)?
            .map(|value| {
                serde_json::from_value(value).map_err(|err| ClientError::Decode(err.to_string()))
            })
            .transpose()
    }

    /// Reads every live entry, after dropping expired ones.
    ///
    /// # Errors
    ///
    /// Returns transport and decode errors.
    pub fn get_all(&mut self) -> Result<BTreeMap<String, Value>, ClientError> {
        self.delete_expired()?;
        Ok(self
            .get_all_with_expiry()?
            .into_iter()
            .map(|(name, stored)| (name, stored.value))
            .collect())
    }

    /// Seconds until `name` expires; `None` when absent or stored without a time-to-live.
    ///
    /// # Errors
    ///
    /// Returns transport and decode errors.
    pub fn expires_in(&mut self, name: &str) -> Result<Option<i64>, ClientError> {
        self.delete_expired()?;
        let now = self.clock.now();
        Ok(self
            .get_with_expiry(name)?
            .and_then(|stored| stored.expires_at)
            .map(|expires_at| expires_at.timestamp() - now.timestamp()))
    }

    /// Returns `true` when a live value is stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns transport and decode errors.
    pub fn exists(&mut self, name: &str) -> Result<bool, ClientError> {
        Ok(self.get(name)?.is_some())
    }

    /// Removes `name`. Removing a missing name succeeds.
    ///
    /// # Errors
    ///
    /// Returns transport errors.
    pub fn delete(&mut self, name: &str) -> Result<(), ClientError> {
        self.send(CommandDescriptor::new(self.backend, Action::Delete).with_name(name))?;
        Ok(())
    }

    /// Removes every entry whose expiry is at or before now.
    ///
    /// # Errors
    ///
    /// Returns transport and decode errors.
    pub fn delete_expired(&mut self) -> Result<(), ClientError> {
        let now = self.clock.now();
        let expired: Vec<String> = self
            .get_all_with_expiry()?
            .into_iter()
            .filter(|(_, stored)| stored.expires_at.is_some_and(|at| at <= now))
            .map(|(name, _)| name)
            .collect();
        for name in expired {
            self.delete(&name)?;
        }
        Ok(())
    }

    fn get_with_expiry(&mut self, name: &str) -> Result<Option<StoredValue>, ClientError> {
        let response =
            self.send(CommandDescriptor::new(self.backend, Action::Get).with_name(name))?;
        let Some(raw) = response else {
            return Ok(None);
        };
        let stored: String = parse_response(&raw)?;
        let (value, expires_at) = decode_value(&stored);
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(StoredValue { value, expires_at }))
    }

    fn get_all_with_expiry(&mut self) -> Result<BTreeMap<String, StoredValue>, ClientError> {
        let response = self.send(CommandDescriptor::new(self.backend, Action::GetAll))?;
        let entries: BTreeMap<String, String> = match response {
            Some(raw) => parse_response(&raw)?,
            None => BTreeMap::new(),
        };
        Ok(entries
            .into_iter()
            .map(|(name, raw)| {
                let (value, expires_at) = decode_value(&raw);
                (name, StoredValue { value, expires_at })
            })
            .collect())
    }

    fn validate<V: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &V,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, ClientError> {
        if name.is_empty() {
            return Err(ClientError::EmptyName);
        }

        let value = serde_json::to_value(value)
            .map_err(|err| ClientError::NotSerializable(err.to_string()))?;
        if is_empty_value(&value) {
            return Err(ClientError::EmptyValue);
        }
        let encoded = encode_value(&value, expires_at);

        let existing = self.get_all_with_expiry()?;
        if !existing.contains_key(name) && existing.len() >= self.limits.max_entries_count {
            return Err(ClientError::TooManyEntries {
                max: self.limits.max_entries_count,
            });
        }

        if name.len() + encoded.len() > self.limits.max_entry_size {
            return Err(ClientError::EntryTooLarge {
                max: self.limits.max_entry_size,
            });
        }

        Ok(encoded)
    }

    fn send(&mut self, command: CommandDescriptor) -> Result<Option<String>, StorageError> {
        let action = command.action.selector().unwrap_or("UNKNOWN").to_string();
        let count = self.call_counts.entry(action.clone()).or_insert(0);
        *count += 1;
        let key = format!("{WIDGET_KEY_PREFIX}__{action}_{count}");
        self.transport.send(&key, &command)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn parse_response<V: DeserializeOwned>(raw: &str) -> Result<V, ClientError> {
    serde_json::from_str(raw).map_err(|err| ClientError::Decode(format!("{err}: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryCookieJar, MemoryStore, StorageBackends};

    #[test]
    fn widget_keys_count_per_action() {
        let transport = DirectTransport::new(StorageBackends::new(
            MemoryCookieJar::default(),
            MemoryStore::default(),
            MemoryStore::default(),
        ));
        let mut client = StorageClient::new(transport, BackendKind::LocalPersistent);

        client.delete("a").expect("delete");
        client.delete("b").expect("delete");
        client.get("a").expect("get");

        assert_eq!(
            client.transport().sent_keys(),
            &[
                "browser_storage__DELETE_1".to_string(),
                "browser_storage__DELETE_2".to_string(),
                "browser_storage__GET_ALL_1".to_string(),
                "browser_storage__GET_1".to_string(),
            ]
        );
    }

    #[test]
    fn empty_values_are_detected() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&serde_json::json!("")));
        assert!(is_empty_value(&serde_json::json!([])));
        assert!(!is_empty_value(&serde_json::json!(0)));
        assert!(!is_empty_value(&serde_json::json!(false)));
    }
}
