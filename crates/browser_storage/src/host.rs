//! Contract for the embedding host that receives published results.

use std::{cell::RefCell, rc::Rc};

use crate::StorageError;

/// Primitives the embedding host exposes to a component instance.
pub trait ComponentHost {
    /// Hands the serialized result string to the host.
    fn set_component_value(&self, value: &str) -> Result<(), StorageError>;

    /// Signals that the component can take further commands.
    fn set_component_ready(&self) -> Result<(), StorageError>;

    /// Requests a frame height. `None` lets the host measure the rendered document.
    fn set_frame_height(&self, height: Option<u32>) -> Result<(), StorageError>;
}

impl<H: ComponentHost + ?Sized> ComponentHost for Rc<H> {
    fn set_component_value(&self, value: &str) -> Result<(), StorageError> {
        (**self).set_component_value(value)
    }

    fn set_component_ready(&self) -> Result<(), StorageError> {
        (**self).set_component_ready()
    }

    fn set_frame_height(&self, height: Option<u32>) -> Result<(), StorageError> {
        (**self).set_frame_height(height)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Host that drops every call.
pub struct NoopHost;

impl ComponentHost for NoopHost {
    fn set_component_value(&self, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn set_component_ready(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn set_frame_height(&self, _height: Option<u32>) -> Result<(), StorageError> {
        Ok(())
    }
}

/// One call received by a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// `set_component_value` with the published string.
    Value(String),
    /// `set_component_ready`.
    Ready,
    /// `set_frame_height` with the requested height.
    FrameHeight(Option<u32>),
}

#[derive(Debug, Clone, Default)]
/// Host that records every call in order. Clones share the log.
pub struct RecordingHost {
    events: Rc<RefCell<Vec<HostEvent>>>,
}

impl RecordingHost {
    /// Every call received so far.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    /// Published values only, in order.
    pub fn published_values(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HostEvent::Value(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forgets recorded calls.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: HostEvent) -> Result<(), StorageError> {
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

impl ComponentHost for RecordingHost {
    fn set_component_value(&self, value: &str) -> Result<(), StorageError> {
        self.push(HostEvent::Value(value.to_string()))
    }

    fn set_component_ready(&self) -> Result<(), StorageError> {
        self.push(HostEvent::Ready)
    }

    fn set_frame_height(&self, height: Option<u32>) -> Result<(), StorageError> {
        self.push(HostEvent::FrameHeight(height))
    }
}
