//! How the client reaches a component instance.

use crate::{
    CommandDescriptor, Dispatcher, StorageBackend, StorageBackends, StorageError,
};

/// Delivers one keyed command and returns the raw string the component published, if any.
pub trait CommandTransport {
    /// Sends `command` under the widget `key`.
    fn send(
        &mut self,
        key: &str,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, StorageError>;
}

impl<T: CommandTransport + ?Sized> CommandTransport for &mut T {
    fn send(
        &mut self,
        key: &str,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, StorageError> {
        (**self).send(key, command)
    }
}

/// Transport that dispatches in-process, skipping the host round trip.
///
/// Every call returns its own serialized result, which is what the host observes under a fresh
/// widget key.
#[derive(Debug, Clone, Default)]
pub struct DirectTransport<C, L, S> {
    dispatcher: Dispatcher<C, L, S>,
    sent_keys: Vec<String>,
}

impl<C, L, S> DirectTransport<C, L, S>
where
    C: StorageBackend,
    L: StorageBackend,
    S: StorageBackend,
{
    /// Creates a transport over the given media.
    pub fn new(backends: StorageBackends<C, L, S>) -> Self {
        Self {
            dispatcher: Dispatcher::new(backends),
            sent_keys: Vec::new(),
        }
    }

    /// Media behind this transport.
    pub fn backends(&self) -> &StorageBackends<C, L, S> {
        self.dispatcher.backends()
    }

    /// Widget keys seen so far, in order.
    pub fn sent_keys(&self) -> &[String] {
        &self.sent_keys
    }
}

impl<C, L, S> CommandTransport for DirectTransport<C, L, S>
where
    C: StorageBackend,
    L: StorageBackend,
    S: StorageBackend,
{
    fn send(
        &mut self,
        key: &str,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, StorageError> {
        self.sent_keys.push(key.to_string());
        self.dispatcher
            .dispatch(command)?
            .filter(|output| output.is_publishable())
            .map(|output| output.to_transport())
            .transpose()
    }
}
