//! Item node message shaping

use log::debug;
use serde_json::Value;

use crate::error::CoercionError;
use crate::nodes::interface::Message;
use crate::types::coerce;

use super::parameters::ItemConfig;

/// Deployed item node: stamps its address and datatype onto each message
#[derive(Debug, Clone)]
pub struct ItemNode {
    config: ItemConfig,
}

impl ItemNode {
    pub fn new(config: ItemConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ItemConfig {
        &self.config
    }

    /// Shape one inbound message for a read or write of this item
    ///
    /// A datatype carried on the inbound message only changes how the
    /// payload is coerced; the message leaves with the configured datatype.
    /// `browseName` always reflects this node, cleared when it is unnamed.
    pub fn process(&self, mut msg: Message) -> Result<Message, CoercionError> {
        let override_type = msg.datatype_override();

        msg.topic = Some(self.config.item.clone());
        msg.datatype = self.config.configured_datatype().map(str::to_string);
        msg.browse_name = Some(self.config.name.clone()).filter(|name| !name.is_empty());

        if self.config.has_static_value() && msg.payload_is_empty() {
            let raw = Value::String(self.config.value.clone());
            msg.payload = self.coerce_payload(&raw, override_type.as_deref())?;
        } else if !msg.payload_is_empty() {
            msg.payload = self.coerce_payload(&msg.payload, override_type.as_deref())?;
        }

        debug!(
            "Item {} shaped message {} as {:?}",
            self.config.item, msg.msg_id, msg.datatype
        );
        Ok(msg)
    }

    fn coerce_payload(
        &self,
        raw: &Value,
        override_type: Option<&str>,
    ) -> Result<Value, CoercionError> {
        match override_type.or(self.config.configured_datatype()) {
            Some(datatype) => Ok(coerce(datatype, raw)?.to_json()),
            None => Ok(raw.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(datatype: &str, value: &str) -> ItemNode {
        ItemNode::new(ItemConfig {
            item: "ns=2;i=4".to_string(),
            datatype: datatype.to_string(),
            value: value.to_string(),
            name: "Level".to_string(),
        })
    }

    #[test]
    fn test_static_value_fills_empty_payload() {
        let out = item("Double", "66.6").process(Message::new("")).unwrap();
        assert_eq!(out.topic.as_deref(), Some("ns=2;i=4"));
        assert_eq!(out.datatype.as_deref(), Some("Double"));
        assert_eq!(out.browse_name.as_deref(), Some("Level"));
        assert_eq!(out.payload, json!(66.6));
    }

    #[test]
    fn test_static_value_coerced_with_message_datatype() {
        let out = item("Double", "12")
            .process(Message::new("").with_datatype("Int16"))
            .unwrap();
        assert_eq!(out.payload, json!(12));
        assert_eq!(out.datatype.as_deref(), Some("Double"));
    }

    #[test]
    fn test_inbound_payload_is_coerced() {
        let out = item("Int32", "").process(Message::new("42")).unwrap();
        assert_eq!(out.payload, json!(42));
    }

    #[test]
    fn test_message_datatype_shapes_payload_only() {
        let out = item("Boolean", "")
            .process(Message::new("3.5").with_datatype("Double"))
            .unwrap();
        assert_eq!(out.payload, json!(3.5));
        assert_eq!(out.datatype.as_deref(), Some("Boolean"));
    }

    #[test]
    fn test_unnamed_item_clears_inbound_browse_name() {
        let node = ItemNode::new(ItemConfig {
            item: "ns=2;i=5".to_string(),
            datatype: "Int32".to_string(),
            value: String::new(),
            name: String::new(),
        });
        let mut msg = Message::new("3");
        msg.browse_name = Some("Level".to_string());

        let out = node.process(msg).unwrap();
        assert_eq!(out.topic.as_deref(), Some("ns=2;i=5"));
        assert_eq!(out.browse_name, None);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let err = item("Double", "NaN").process(Message::new("")).unwrap_err();
        assert!(matches!(err, CoercionError::InvalidValue { .. }));

        let err = item("Float", "").process(Message::new("inf")).unwrap_err();
        assert!(matches!(err, CoercionError::InvalidValue { .. }));
    }

    #[test]
    fn test_numeric_zero_is_not_empty() {
        let out = item("Double", "66.6").process(Message::new(0)).unwrap();
        assert_eq!(out.payload, json!(0.0));
    }

    #[test]
    fn test_empty_payload_without_static_value_passes_through() {
        let out = item("Double", "").process(Message::new("")).unwrap();
        assert_eq!(out.payload, json!(""));
        assert_eq!(out.topic.as_deref(), Some("ns=2;i=4"));
    }

    #[test]
    fn test_untyped_item_keeps_raw_values() {
        let out = item("", "hello").process(Message::new("")).unwrap();
        assert_eq!(out.payload, json!("hello"));
        assert_eq!(out.datatype, None);
    }

    #[test]
    fn test_carried_fields_survive() {
        let mut msg = Message::new("1");
        msg.extra.insert("correlation".to_string(), json!("batch-7"));
        let out = item("Int32", "").process(msg).unwrap();
        assert_eq!(out.extra.get("correlation"), Some(&json!("batch-7")));
    }

    #[test]
    fn test_coercion_failure_propagates() {
        let err = item("Int32", "").process(Message::new("ten")).unwrap_err();
        assert!(matches!(err, CoercionError::InvalidValue { .. }));

        let err = item("Decimal", "1").process(Message::new("")).unwrap_err();
        assert_eq!(err, CoercionError::UnknownDataType("Decimal".to_string()));
    }
}
