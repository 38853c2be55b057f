//! Node system - message envelope, factories and the OPC UA node implementations

// Core node system modules
pub mod execution_engine;
pub mod factory;
pub mod interface;
pub mod node;

// OPC UA node implementations
pub mod opcua;

// Re-export core types
pub use interface::{FlowNode, Message, MethodArgument};
pub use node::OpcUaNode;

// Re-export factory types
pub use factory::{NodeCategory, NodeFactory, NodeMetadata, NodeRegistry, PortDefinition};

// Re-export execution engine types
pub use execution_engine::{Delivery, ExecutionStats, FlowEngine, FlowNodeDefinition, NodeState};
