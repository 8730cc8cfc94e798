//! Routes a [`CommandDescriptor`] to the selected medium and normalizes the outcome.

use serde::Serialize;

use crate::{
    Action, CommandDescriptor, StorageBackend, StorageBackends, StorageError, StoredEntries,
    NULL_SENTINEL,
};

/// Normalized result of one dispatch, serialized untagged for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    /// SET/DELETE completion flag.
    Flag(bool),
    /// GET value, or [`NULL_SENTINEL`] when absent.
    Value(String),
    /// GET_ALL mapping.
    Entries(StoredEntries),
}

impl CommandOutput {
    /// Returns `false` for outputs the host is never notified about (`false`, `""`).
    pub fn is_publishable(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Value(value) => !value.is_empty(),
            Self::Entries(_) => true,
        }
    }

    /// Serializes the output into the host transport string.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if JSON encoding fails.
    pub fn to_transport(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Resolves backend and action for each command and runs it against the chosen medium.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<C, L, S> {
    backends: StorageBackends<C, L, S>,
}

impl<C, L, S> Dispatcher<C, L, S>
where
    C: StorageBackend,
    L: StorageBackend,
    S: StorageBackend,
{
    /// Creates a dispatcher over the given media.
    pub fn new(backends: StorageBackends<C, L, S>) -> Self {
        Self { backends }
    }

    /// Media this dispatcher drives.
    pub fn backends(&self) -> &StorageBackends<C, L, S> {
        &self.backends
    }

    /// Executes `command`.
    ///
    /// Returns `Ok(None)` for unknown actions. A missing `name` is treated as the empty key and
    /// a missing `value` as the empty string.
    ///
    /// # Errors
    ///
    /// Propagates faults raised by the selected medium.
    pub fn dispatch(
        &self,
        command: &CommandDescriptor,
    ) -> Result<Option<CommandOutput>, StorageError> {
        let backend = self.backends.select(command.backend);
        let name = command.name_or_empty();

        let output = match command.action {
            Action::Set => {
                backend.set(
                    name,
                    command.value.as_deref().unwrap_or_default(),
                    command.expires_at.as_deref(),
                )?;
                CommandOutput::Flag(true)
            }
            Action::Get => {
                let value = backend.get(name)?;
                if value.is_empty() {
                    CommandOutput::Value(NULL_SENTINEL.to_string())
                } else {
                    CommandOutput::Value(value)
                }
            }
            Action::GetAll => CommandOutput::Entries(backend.get_all()?),
            Action::Delete => {
                backend.delete(name)?;
                CommandOutput::Flag(true)
            }
            Action::Unknown(_) => return Ok(None),
        };
        Ok(Some(output))
    }
}
