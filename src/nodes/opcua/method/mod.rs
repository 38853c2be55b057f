//! Method node implementation
//!
//! Prepares a method call: object id, method id and typed input arguments.

pub mod logic;
pub mod parameters;

pub use logic::*;
pub use parameters::*;

use serde_json::Value;

use crate::error::ConfigError;
use crate::nodes::node::OpcUaNode;
use crate::nodes::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};

#[derive(Default)]
pub struct MethodNodeFactory;

impl NodeFactory for MethodNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "OpcUa-Method",
            "OpcUa Method",
            NodeCategory::opcua(),
            "Prepares a method call with typed input arguments",
        )
        .with_icon("opcuamethod.png")
        .with_inputs(vec![PortDefinition::new("input").with_description(
            "Trigger; inputArguments on the message replace the configured ones",
        )])
        .with_outputs(vec![PortDefinition::new("output")])
        .with_tags(vec!["opcua", "method", "call"])
    }

    fn create(config: Value) -> Result<OpcUaNode, ConfigError> {
        let config: MethodConfig = serde_json::from_value(config)?;
        if config.methodid.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "methodid",
                context: format!("method node '{}'", config.name),
            });
        }
        Ok(OpcUaNode::Method(MethodNode::new(config)))
    }
}
