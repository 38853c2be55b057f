//! OPC UA value types the nodes produce for the downstream client

pub mod event_filter;
pub mod security;
pub mod variant;

pub use opcua::types::{EventFilter, NodeId};
pub use security::{resolve_mode, resolve_policy, MessageSecurityMode, SecurityPolicy};
pub use variant::{coerce, coerce_str, DataType, TypeTag, Variant};
