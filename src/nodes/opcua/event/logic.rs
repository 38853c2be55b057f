//! Event node message shaping

use log::debug;

use crate::constants::{event_type_name, EVENT_FIELDS};
use crate::nodes::interface::Message;
use crate::types::{event_filter, EventFilter};

use super::parameters::EventConfig;

/// Deployed event node: attaches the event filter used for alarm subscriptions
#[derive(Debug, Clone)]
pub struct EventNode {
    config: EventConfig,
}

impl EventNode {
    pub fn new(config: EventConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// Fixed field list, in select-clause order
    pub fn event_fields() -> Vec<String> {
        EVENT_FIELDS.iter().map(|field| field.to_string()).collect()
    }

    /// Subscription filter selecting every field of [`Self::event_fields`]
    pub fn event_filter() -> EventFilter {
        event_filter::from_fields(&EVENT_FIELDS)
    }

    pub fn process(&self, mut msg: Message) -> Message {
        let fields = Self::event_fields();
        let event_type = self.config.event_type_id().to_string();

        debug!(
            "Event node subscribing {} to {} ({})",
            self.config.root,
            event_type,
            event_type_name(&event_type).unwrap_or("custom")
        );

        msg.event_filter = Some(event_filter::to_json(&Self::event_filter()));
        msg.event_fields = Some(fields);
        msg.topic = Some(self.config.root.clone());
        msg.event_type_ids = Some(event_type);
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(activate_custom: bool) -> EventNode {
        EventNode::new(EventConfig {
            root: "ns=0;i=85".to_string(),
            eventtype: "ns=0;i=10751".to_string(),
            customeventtype: "ns=4;i=5001".to_string(),
            activatecustomevent: activate_custom,
            name: "Alarms".to_string(),
        })
    }

    #[test]
    fn test_standard_event_type() {
        let out = event(false).process(Message::new(""));
        assert_eq!(out.topic.as_deref(), Some("ns=0;i=85"));
        assert_eq!(out.event_type_ids.as_deref(), Some("ns=0;i=10751"));
    }

    #[test]
    fn test_custom_event_type() {
        let out = event(true).process(Message::new(""));
        assert_eq!(out.event_type_ids.as_deref(), Some("ns=4;i=5001"));
    }

    #[test]
    fn test_fixed_field_list_regardless_of_input() {
        let mut noisy = Message::new(json!({ "fields": ["Only"] }));
        noisy.event_fields = Some(vec!["Only".to_string()]);

        for msg in [Message::new(""), noisy] {
            let out = event(false).process(msg);
            let fields = out.event_fields.unwrap();
            assert_eq!(fields.len(), 27);
            assert_eq!(fields[0], "EventId");
            assert_eq!(fields[26], "LowLowLimit");
            assert_eq!(event_filter::field_names(&EventNode::event_filter()), fields);
            let clauses = &out.event_filter.unwrap()["selectClauses"];
            assert_eq!(clauses.as_array().map(Vec::len), Some(27));
            assert_eq!(clauses[0]["browsePath"][0]["name"], json!("EventId"));
        }
    }

    #[test]
    fn test_payload_is_untouched() {
        let out = event(false).process(Message::new("keep"));
        assert_eq!(out.payload, json!("keep"));
    }
}
