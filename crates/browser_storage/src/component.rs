//! One component instance: dispatch, normalize, publish, resize.

use crate::{
    CommandDescriptor, ComponentConfig, ComponentHost, Dispatcher, PublishOutcome,
    ResultPublisher, StorageBackend, StorageBackends, StorageError,
};

/// Storage component bound to three media and one host.
///
/// Each [`render`](Self::render) call is one host-triggered render cycle. The dedup slot lives
/// as long as this value; recreate the component to reset it.
#[derive(Debug, Clone)]
pub struct BrowserStorageComponent<C, L, S, H> {
    dispatcher: Dispatcher<C, L, S>,
    publisher: ResultPublisher<H>,
    config: ComponentConfig,
}

impl<C, L, S, H> BrowserStorageComponent<C, L, S, H>
where
    C: StorageBackend,
    L: StorageBackend,
    S: StorageBackend,
    H: ComponentHost,
{
    /// Creates a component with default configuration.
    pub fn new(backends: StorageBackends<C, L, S>, host: H) -> Self {
        Self::with_config(backends, host, ComponentConfig::default())
    }

    /// Creates a component with explicit configuration.
    pub fn with_config(
        backends: StorageBackends<C, L, S>,
        host: H,
        config: ComponentConfig,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(backends),
            publisher: ResultPublisher::new(host),
            config,
        }
    }

    /// The dispatcher driving the media.
    pub fn dispatcher(&self) -> &Dispatcher<C, L, S> {
        &self.dispatcher
    }

    /// The publisher owning the host boundary.
    pub fn publisher(&self) -> &ResultPublisher<H> {
        &self.publisher
    }

    /// Runs one render cycle for `command`.
    ///
    /// The frame height is requested on every cycle, including failed ones.
    ///
    /// # Errors
    ///
    /// Returns the first medium, serialization, or host fault raised during the cycle.
    pub fn render(&mut self, command: &CommandDescriptor) -> Result<PublishOutcome, StorageError> {
        let outcome = self
            .dispatcher
            .dispatch(command)
            .and_then(|output| self.publisher.publish(output.as_ref()));
        let resized = self
            .publisher
            .host()
            .set_frame_height(self.config.frame_height);
        let outcome = outcome?;
        resized?;
        Ok(outcome)
    }
}
