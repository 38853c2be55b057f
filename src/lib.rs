//! OPC UA flow nodes
//!
//! Item, event, method and endpoint nodes for a flow-based automation host.
//! The nodes do no protocol work themselves: they read their configuration,
//! shape the outgoing message (address, datatype, coerced payload, event
//! filter) and hand it to a downstream client node that owns the session.

pub mod constants;
pub mod error;
pub mod nodes;
pub mod types;

// Re-export commonly used types
pub use error::{CoercionError, ConfigError, NodeError};
pub use nodes::{FlowEngine, FlowNode, Message, NodeRegistry, OpcUaNode};
pub use types::{
    coerce, coerce_str, DataType, EventFilter, MessageSecurityMode, NodeId, SecurityPolicy, Variant,
};
