//! OPC UA nodes - modular structure
//!
//! Each node kind lives in its own directory:
//! - mod.rs: factory and palette metadata
//! - parameters.rs: configuration as persisted by the host
//! - logic.rs: message shaping on input

pub mod endpoint;
pub mod event;
pub mod item;
pub mod method;

pub use endpoint::{Credentials, EndpointConfig, EndpointNode, EndpointNodeFactory, UserIdentity};
pub use event::{EventConfig, EventNode, EventNodeFactory};
pub use item::{ItemConfig, ItemNode, ItemNodeFactory};
pub use method::{MethodConfig, MethodNode, MethodNodeFactory};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Form fields are persisted as text, but hand-written flows often use
/// plain JSON scalars; both are read as a string.
pub(crate) fn text_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Checkbox fields: JSON bool or the strings "true"/"false"
pub(crate) fn flag_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => match s.trim() {
            "true" | "on" => Ok(true),
            "false" | "off" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("expected boolean, got '{other}'"))),
        },
        other => Err(serde::de::Error::custom(format!("expected boolean, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "text_field")]
        text: String,
        #[serde(default, deserialize_with = "flag_field")]
        flag: bool,
    }

    #[test]
    fn test_text_and_flag_fields() {
        let parsed: Fields =
            serde_json::from_value(json!({ "text": 66.6, "flag": "true" })).unwrap();
        assert_eq!(parsed.text, "66.6");
        assert!(parsed.flag);

        let defaults: Fields = serde_json::from_value(json!({})).unwrap();
        assert_eq!(defaults.text, "");
        assert!(!defaults.flag);

        assert!(serde_json::from_value::<Fields>(json!({ "flag": "yes please" })).is_err());
    }
}
