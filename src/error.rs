//! Error types shared by the OPC UA nodes

use thiserror::Error;

/// Failure to turn a raw value into the representation a datatype expects
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoercionError {
    #[error("unknown datatype '{0}'")]
    UnknownDataType(String),

    #[error("cannot coerce '{value}' to {datatype}: {reason}")]
    InvalidValue {
        datatype: String,
        value: String,
        reason: String,
    },

    #[error("invalid node id '{0}'")]
    InvalidNodeId(String),
}

impl CoercionError {
    pub(crate) fn invalid(datatype: &str, value: impl ToString, reason: impl ToString) -> Self {
        CoercionError::InvalidValue {
            datatype: datatype.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Problems reading a persisted node or flow configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown node type '{0}'")]
    UnknownNodeType(String),

    #[error("missing field '{field}' in {context}")]
    MissingField { field: &'static str, context: String },

    #[error("invalid configuration: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Error reported on a node's error channel while handling an input message
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("{node_type}: {source}")]
    Coercion {
        node_type: &'static str,
        #[source]
        source: CoercionError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no deployed node with id '{0}'")]
    UnknownNode(String),
}

impl NodeError {
    pub fn coercion(node_type: &'static str, source: CoercionError) -> Self {
        NodeError::Coercion { node_type, source }
    }
}
