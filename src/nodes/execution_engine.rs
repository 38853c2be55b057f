//! Flow execution engine
//!
//! Stands in for the host runtime: deploys nodes from a persisted flow,
//! runs each input handler to completion and forwards the result along the
//! node's wires. Messages that leave the deployed OPC UA nodes (a wire to a
//! client node, or no wire at all) are returned as deliveries.

use std::collections::{HashMap, VecDeque};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, NodeError};
use crate::nodes::factory::NodeRegistry;
use crate::nodes::interface::{FlowNode, Message};
use crate::nodes::node::OpcUaNode;

/// Upper bound on node invocations per injected message
pub const MAX_HOPS: usize = 1024;

/// One node object as the host persists it in a flow file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNodeDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub wires: Vec<Vec<String>>,
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

/// Status annotation the host shows on a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Clean,
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionStats {
    pub processed: usize,
    pub emitted: usize,
    pub failed: usize,
}

/// A message that left the deployed nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub source: String,
    /// Wired target outside this crate, `None` for an unwired output
    pub target: Option<String>,
    pub message: Message,
}

struct DeployedNode {
    node: OpcUaNode,
    wires: Vec<String>,
}

pub struct FlowEngine {
    nodes: HashMap<String, DeployedNode>,
    /// Nodes of types this crate does not implement, by id
    external: HashMap<String, String>,
    node_states: HashMap<String, NodeState>,
    stats: ExecutionStats,
}

impl FlowEngine {
    /// Deploy every node of `flow`, failing on the first invalid configuration
    pub fn deploy(
        registry: &NodeRegistry,
        flow: &[FlowNodeDefinition],
    ) -> Result<Self, ConfigError> {
        let mut nodes = HashMap::new();
        let mut external = HashMap::new();

        for definition in flow {
            if !registry.has_node_type(&definition.node_type) {
                debug!(
                    "Node {} ({}) is handled outside this flow engine",
                    definition.id, definition.node_type
                );
                external.insert(definition.id.clone(), definition.node_type.clone());
                continue;
            }

            let config = Value::Object(definition.config.clone());
            let node = registry.create_node(&definition.node_type, config)?;
            let wires = definition.wires.iter().flatten().cloned().collect();
            nodes.insert(definition.id.clone(), DeployedNode { node, wires });
        }

        info!("Deployed {} OPC UA node(s), {} external", nodes.len(), external.len());
        Ok(Self {
            nodes,
            external,
            node_states: HashMap::new(),
            stats: ExecutionStats::default(),
        })
    }

    /// Parse a flow file body and deploy it
    pub fn from_json(registry: &NodeRegistry, flow_json: &str) -> Result<Self, ConfigError> {
        let flow: Vec<FlowNodeDefinition> = serde_json::from_str(flow_json)?;
        Self::deploy(registry, &flow)
    }

    pub fn node(&self, id: &str) -> Option<&OpcUaNode> {
        self.nodes.get(id).map(|deployed| &deployed.node)
    }

    /// Type of a node deployed outside this engine, e.g. the client node
    pub fn external_type(&self, id: &str) -> Option<&str> {
        self.external.get(id).map(String::as_str)
    }

    pub fn node_state(&self, id: &str) -> Option<&NodeState> {
        self.node_states.get(id)
    }

    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    /// Trigger `node_id` with `msg` and run the flow until it settles
    ///
    /// A failing node is marked with [`NodeState::Error`] and its message is
    /// dropped; other branches keep running.
    pub fn inject(&mut self, node_id: &str, msg: Message) -> Result<Vec<Delivery>, NodeError> {
        if !self.nodes.contains_key(node_id) {
            return Err(NodeError::UnknownNode(node_id.to_string()));
        }

        let mut deliveries = Vec::new();
        let mut queue = VecDeque::from([(node_id.to_string(), msg)]);
        let mut hops = 0;

        while let Some((id, msg)) = queue.pop_front() {
            hops += 1;
            if hops > MAX_HOPS {
                warn!(
                    "Flow did not settle after {} hops, dropping {} queued message(s)",
                    MAX_HOPS,
                    queue.len() + 1
                );
                break;
            }

            let Some(deployed) = self.nodes.get(&id) else {
                continue;
            };

            self.stats.processed += 1;
            let output = match deployed.node.on_input(msg) {
                Ok(output) => {
                    self.node_states.insert(id.clone(), NodeState::Clean);
                    output
                }
                Err(e) => {
                    error!("Node {} ({}) failed: {}", id, deployed.node.node_type(), e);
                    self.node_states.insert(id.clone(), NodeState::Error(e.to_string()));
                    self.stats.failed += 1;
                    continue;
                }
            };

            let Some(out) = output else {
                continue;
            };
            self.stats.emitted += 1;

            if deployed.wires.is_empty() {
                deliveries.push(Delivery { source: id, target: None, message: out });
                continue;
            }

            for target in &deployed.wires {
                if self.nodes.contains_key(target) {
                    queue.push_back((target.clone(), out.clone()));
                } else {
                    if !self.external.contains_key(target) {
                        warn!("Node {} is wired to unknown node {}", id, target);
                    }
                    deliveries.push(Delivery {
                        source: id.clone(),
                        target: Some(target.clone()),
                        message: out.clone(),
                    });
                }
            }
        }

        Ok(deliveries)
    }
}
