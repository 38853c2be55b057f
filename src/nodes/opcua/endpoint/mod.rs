//! Endpoint configuration node
//!
//! Holds connection parameters for the client node. It has no inputs and
//! never sends messages.

pub mod logic;
pub mod parameters;

pub use logic::*;
pub use parameters::*;

use serde_json::Value;

use crate::error::ConfigError;
use crate::nodes::node::OpcUaNode;
use crate::nodes::{NodeFactory, NodeMetadata};

#[derive(Default)]
pub struct EndpointNodeFactory;

impl NodeFactory for EndpointNodeFactory {
    fn metadata() -> NodeMetadata {
        NodeMetadata::config(
            "OpcUa-Endpoint",
            "OpcUa Endpoint",
            "Endpoint URL, security policy, security mode and credentials for the client",
        )
        .with_tags(vec!["opcua", "endpoint", "security", "config"])
    }

    fn create(config: Value) -> Result<OpcUaNode, ConfigError> {
        let config: EndpointConfig = serde_json::from_value(config)?;
        Ok(OpcUaNode::Endpoint(EndpointNode::new(config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MessageSecurityMode, SecurityPolicy};
    use serde_json::json;

    #[test]
    fn test_create_from_persisted_config() {
        let node = EndpointNodeFactory::create(json!({
            "endpoint": "opc.tcp://localhost:53530/OPCUA/SimulationServer",
            "secpolicy": "Aes128_Sha256_RsaOaep",
            "secmode": "SIGN",
            "login": true,
            "credentials": { "user": "operator", "password": "pw" }
        }))
        .unwrap();

        let OpcUaNode::Endpoint(endpoint) = node else {
            panic!("expected endpoint node");
        };
        assert_eq!(endpoint.security_policy, SecurityPolicy::Aes128Sha256RsaOaep);
        assert_eq!(endpoint.security_mode, MessageSecurityMode::Sign);
        assert!(matches!(
            endpoint.user_identity(),
            UserIdentity::UserName { user, .. } if user == "operator"
        ));
    }

    #[test]
    fn test_missing_fields_default_to_insecure_anonymous() {
        let node =
            EndpointNodeFactory::create(json!({ "endpoint": "opc.tcp://plc:4840" })).unwrap();
        let OpcUaNode::Endpoint(endpoint) = node else {
            panic!("expected endpoint node");
        };
        assert_eq!(endpoint.security_policy, SecurityPolicy::None);
        assert_eq!(endpoint.security_mode, MessageSecurityMode::None);
        assert_eq!(endpoint.user_identity(), &UserIdentity::Anonymous);
    }
}
