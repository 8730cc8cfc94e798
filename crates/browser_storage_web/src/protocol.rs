//! Message shapes exchanged with the embedding page over `postMessage`.

use browser_storage::CommandDescriptor;
use serde::Deserialize;
use serde_json::{json, Value};

/// Component protocol version announced with the ready message.
pub const API_VERSION: u32 = 1;

/// Message type the host uses to deliver component arguments.
pub const RENDER_MESSAGE: &str = "streamlit:render";
/// Message type announcing the component accepts commands.
pub const COMPONENT_READY_MESSAGE: &str = "streamlit:componentReady";
/// Message type carrying a published value.
pub const SET_COMPONENT_VALUE_MESSAGE: &str = "streamlit:setComponentValue";
/// Message type carrying a frame height.
pub const SET_FRAME_HEIGHT_MESSAGE: &str = "streamlit:setFrameHeight";

fn outgoing(kind: &str, mut payload: Value) -> Value {
    if let Value::Object(fields) = &mut payload {
        fields.insert("isStreamlitMessage".to_string(), Value::Bool(true));
        fields.insert("type".to_string(), Value::String(kind.to_string()));
    }
    payload
}

/// Builds the ready announcement.
pub fn component_ready_message() -> Value {
    outgoing(COMPONENT_READY_MESSAGE, json!({ "apiVersion": API_VERSION }))
}

/// Builds the value publication for an already serialized result.
pub fn set_component_value_message(value: &str) -> Value {
    outgoing(
        SET_COMPONENT_VALUE_MESSAGE,
        json!({ "value": value, "dataType": "json" }),
    )
}

/// Builds the frame height request.
pub fn set_frame_height_message(height: u32) -> Value {
    outgoing(SET_FRAME_HEIGHT_MESSAGE, json!({ "height": height }))
}

#[derive(Debug, Deserialize)]
struct IncomingMessage {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    args: Option<Value>,
}

/// Extracts the command from a host render message.
///
/// Returns `None` for messages of any other type. A render message whose arguments do not form
/// a descriptor yields `Some(Err(..))`.
pub fn parse_render_message(data: Value) -> Option<Result<CommandDescriptor, serde_json::Error>> {
    let message: IncomingMessage = serde_json::from_value(data).ok()?;
    if message.kind.as_deref() != Some(RENDER_MESSAGE) {
        return None;
    }
    let args = message.args.unwrap_or_else(|| json!({}));
    Some(serde_json::from_value(args))
}
