//! Message envelope passed between nodes and the node input contract

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NodeError;

/// Typed input argument for a method call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodArgument {
    pub data_type: String,
    pub value: Value,
}

/// Core message flowing from a node to the downstream client
///
/// Known fields are typed; anything else the inbound message carried is kept
/// in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_msgid", default = "new_msg_id")]
    pub msg_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browse_name: Option<String>,

    #[serde(default)]
    pub payload: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_filter: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_fields: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type_ids: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_arguments: Option<Vec<MethodArgument>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn new_msg_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl Default for Message {
    fn default() -> Self {
        Self {
            msg_id: new_msg_id(),
            topic: None,
            datatype: None,
            browse_name: None,
            payload: Value::String(String::new()),
            event_filter: None,
            event_fields: None,
            event_type_ids: None,
            object_id: None,
            method_id: None,
            input_arguments: None,
            extra: Map::new(),
        }
    }
}

impl Message {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self { payload: payload.into(), ..Self::default() }
    }

    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    /// Zero-length payload: empty string or empty array. A missing payload
    /// counts as empty; numbers, booleans and objects never do.
    pub fn payload_is_empty(&self) -> bool {
        match &self.payload {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Datatype the inbound message asked for, if any
    pub fn datatype_override(&self) -> Option<String> {
        self.datatype
            .as_deref()
            .map(str::trim)
            .filter(|dt| !dt.is_empty())
            .map(str::to_string)
    }
}

/// Behaviour every deployed node exposes to the flow runtime
pub trait FlowNode: Send + Sync {
    /// Registered type name, e.g. `OpcUa-Item`
    fn node_type(&self) -> &'static str;

    /// Display name configured on the node
    fn name(&self) -> &str;

    /// Handle one inbound message; `None` means nothing is sent on
    fn on_input(&self, msg: Message) -> Result<Option<Message>, NodeError>;
}
