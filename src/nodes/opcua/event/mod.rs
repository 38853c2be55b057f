//! Event node implementation
//!
//! Builds the event filter for an alarm and condition subscription rooted
//! at the configured node.

pub mod logic;
pub mod parameters;

pub use logic::*;
pub use parameters::*;

use serde_json::Value;

use crate::error::ConfigError;
use crate::nodes::node::OpcUaNode;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct EventNodeFactory;

impl NodeFactory for EventNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "OpcUa-Event",
            "OpcUa Event",
            NodeCategory::opcua(),
            "Prepares an event subscription with the standard alarm field list",
        )
        .with_icon("opcuaevent.png")
        .with_inputs(vec![PortDefinition::new("input")])
        .with_outputs(vec![PortDefinition::new("output")
            .with_description("Message carrying eventFilter, eventFields and eventTypeIds")])
        .with_tags(vec!["opcua", "event", "alarm", "condition", "subscribe"])
    }

    fn create(config: Value) -> Result<OpcUaNode, ConfigError> {
        let config: EventConfig = serde_json::from_value(config)?;
        Ok(OpcUaNode::Event(EventNode::new(config)))
    }
}
