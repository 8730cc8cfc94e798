//! Deduplicating publication of dispatch results to the host.

use crate::{CommandOutput, ComponentHost, StorageError};

/// What [`ResultPublisher::publish`] did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The host was notified with this transport string.
    Published(String),
    /// The result serialized to the last published string; the host was not notified.
    Unchanged,
    /// The result was absent or empty; the host was not notified.
    Suppressed,
}

/// Sole owner of the host boundary for results.
///
/// Holds the last published transport string for the lifetime of the component instance, so
/// the host never sees the same string twice in a row.
#[derive(Debug, Clone)]
pub struct ResultPublisher<H> {
    host: H,
    last_published: Option<String>,
}

impl<H: ComponentHost> ResultPublisher<H> {
    /// Creates a publisher with an empty dedup slot.
    pub fn new(host: H) -> Self {
        Self {
            host,
            last_published: None,
        }
    }

    /// The host this publisher notifies.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Last transport string handed to the host, if any.
    pub fn last_published(&self) -> Option<&str> {
        self.last_published.as_deref()
    }

    /// Publishes `output` unless it is absent, empty, or identical to the previous publish.
    ///
    /// The dedup slot is overwritten only once the host has accepted the value, so a failed
    /// notification leaves the previous value in place and the same result publishes again.
    ///
    /// # Errors
    ///
    /// Returns serialization faults and host notification faults.
    pub fn publish(
        &mut self,
        output: Option<&CommandOutput>,
    ) -> Result<PublishOutcome, StorageError> {
        let Some(output) = output.filter(|output| output.is_publishable()) else {
            return Ok(PublishOutcome::Suppressed);
        };

        let serialized = output.to_transport()?;
        if self.last_published.as_deref() == Some(serialized.as_str()) {
            return Ok(PublishOutcome::Unchanged);
        }

        self.host.set_component_value(&serialized)?;
        self.last_published = Some(serialized.clone());
        self.host.set_component_ready()?;
        Ok(PublishOutcome::Published(serialized))
    }
}
