//! Host adapter that talks to the embedding page through `window.parent.postMessage`.

use std::cell::Cell;

use browser_storage::{ComponentHost, StorageError};
use serde_json::Value;

use crate::protocol::{
    component_ready_message, set_component_value_message, set_frame_height_message,
};

#[derive(Debug, Default)]
/// Component host reached through the parent frame.
///
/// Frame height requests are skipped when the height has not changed since the last request.
pub struct PostMessageHost {
    last_frame_height: Cell<Option<u32>>,
}

impl PostMessageHost {
    /// Creates a host adapter that has not requested any frame height yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn post(&self, message: &Value) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            use serde::Serialize;

            let payload = message
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(|err| StorageError::Host(err.to_string()))?;
            let window =
                web_sys::window().ok_or_else(|| StorageError::Host("no window".to_string()))?;
            let target = window
                .parent()
                .map_err(|err| StorageError::Host(format!("{err:?}")))?
                .unwrap_or(window);
            target
                .post_message(&payload, "*")
                .map_err(|err| StorageError::Host(format!("postMessage failed: {err:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = message;
            Ok(())
        }
    }

    fn measured_height() -> u32 {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.body())
                .map(|body| body.scroll_height().max(0) as u32)
                .unwrap_or(0)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            0
        }
    }

    /// Announces that the component accepts render messages.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Host`] when the message cannot be posted.
    pub fn announce_ready(&self) -> Result<(), StorageError> {
        self.post(&component_ready_message())
    }
}

impl ComponentHost for PostMessageHost {
    fn set_component_value(&self, value: &str) -> Result<(), StorageError> {
        self.post(&set_component_value_message(value))
    }

    fn set_component_ready(&self) -> Result<(), StorageError> {
        self.announce_ready()
    }

    fn set_frame_height(&self, height: Option<u32>) -> Result<(), StorageError> {
        let height = height.unwrap_or_else(Self::measured_height);
        if self.last_frame_height.get() == Some(height) {
            return Ok(());
        }
        self.post(&set_frame_height_message(height))?;
        self.last_frame_height.set(Some(height));
        Ok(())
    }
}
