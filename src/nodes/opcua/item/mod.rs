//! Item node implementation
//!
//! Addresses one variable: stamps its node id, datatype and browse name on
//! the message and coerces the payload for a downstream read or write.

pub mod logic;
pub mod parameters;

pub use logic::*;
pub use parameters::*;

use serde_json::Value;

use crate::error::ConfigError;
use crate::nodes::node::OpcUaNode;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct ItemNodeFactory;

impl NodeFactory for ItemNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "OpcUa-Item",
            "OpcUa Item",
            NodeCategory::opcua(),
            "Addresses an OPC UA variable and coerces the payload to its datatype",
        )
        .with_icon("opcuanodeid.png")
        .with_inputs(vec![PortDefinition::new("input")
            .with_description("Trigger; an empty payload sends the configured value")])
        .with_outputs(vec![PortDefinition::new("output")
            .with_description("Message addressed to the item, for the client node")])
        .with_tags(vec!["opcua", "item", "read", "write", "variable"])
    }

    fn create(config: Value) -> Result<OpcUaNode, ConfigError> {
        let config: ItemConfig = serde_json::from_value(config)?;
        Ok(OpcUaNode::Item(ItemNode::new(config)))
    }
}
