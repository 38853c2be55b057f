//! Deployed node instances

use log::debug;

use crate::error::NodeError;
use crate::nodes::interface::{FlowNode, Message};
use crate::nodes::opcua::{EndpointNode, EventNode, ItemNode, MethodNode};

/// A deployed OPC UA node, one variant per node kind
#[derive(Debug, Clone)]
pub enum OpcUaNode {
    Item(ItemNode),
    Event(EventNode),
    Method(MethodNode),
    Endpoint(EndpointNode),
}

impl FlowNode for OpcUaNode {
    fn node_type(&self) -> &'static str {
        match self {
            OpcUaNode::Item(_) => "OpcUa-Item",
            OpcUaNode::Event(_) => "OpcUa-Event",
            OpcUaNode::Method(_) => "OpcUa-Method",
            OpcUaNode::Endpoint(_) => "OpcUa-Endpoint",
        }
    }

    fn name(&self) -> &str {
        match self {
            OpcUaNode::Item(node) => &node.config().name,
            OpcUaNode::Event(node) => &node.config().name,
            OpcUaNode::Method(node) => &node.config().name,
            OpcUaNode::Endpoint(node) => &node.name,
        }
    }

    fn on_input(&self, msg: Message) -> Result<Option<Message>, NodeError> {
        let node_type = self.node_type();
        match self {
            OpcUaNode::Item(node) => node
                .process(msg)
                .map(Some)
                .map_err(|e| NodeError::coercion(node_type, e)),
            OpcUaNode::Event(node) => Ok(Some(node.process(msg))),
            OpcUaNode::Method(node) => node
                .process(msg)
                .map(Some)
                .map_err(|e| NodeError::coercion(node_type, e)),
            OpcUaNode::Endpoint(node) => {
                debug!("Endpoint {} ignores input {}", node.endpoint_url, msg.msg_id);
                Ok(None)
            }
        }
    }
}

impl OpcUaNode {
    /// Endpoint settings when this is a configuration node
    pub fn as_endpoint(&self) -> Option<&EndpointNode> {
        match self {
            OpcUaNode::Endpoint(endpoint) => Some(endpoint),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::opcua::{EndpointConfig, ItemConfig};
    use serde_json::json;

    #[test]
    fn test_endpoint_sends_nothing() {
        let node = OpcUaNode::Endpoint(EndpointNode::new(EndpointConfig::default()));
        assert!(node.on_input(Message::new("x")).unwrap().is_none());
        assert!(node.as_endpoint().is_some());
    }

    #[test]
    fn test_item_error_is_tagged_with_node_type() {
        let node = OpcUaNode::Item(ItemNode::new(ItemConfig {
            item: "ns=2;i=4".to_string(),
            datatype: "Int16".to_string(),
            ..ItemConfig::default()
        }));
        let err = node.on_input(Message::new(json!(70000))).unwrap_err();
        assert!(err.to_string().starts_with("OpcUa-Item: cannot coerce"));
    }
}
