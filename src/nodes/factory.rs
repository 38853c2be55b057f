//! Node factory system with self-registration and rich metadata

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde_json::Value;

use crate::error::ConfigError;
use crate::nodes::node::OpcUaNode;

/// Hierarchical category system for organizing nodes in the palette
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_child_of(&self, other: &NodeCategory) -> bool {
        self.path.len() > other.path.len() && self.path[..other.path.len()] == other.path
    }

    pub fn display_string(&self) -> String {
        self.path.join(" > ")
    }

    /// Palette section for the OPC UA nodes
    pub fn opcua() -> Self {
        Self::new(&["OPC UA"])
    }

    /// Configuration nodes, hidden from the palette
    pub fn opcua_config() -> Self {
        Self::new(&["OPC UA", "Config"])
    }
}

/// Port definition for node creation
#[derive(Debug, Clone)]
pub struct PortDefinition {
    pub name: String,
    pub description: Option<String>,
}

impl PortDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Rich metadata for nodes - the single source of truth for palette entries
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    // Core identity
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub version: &'static str,

    // Palette appearance
    pub color: &'static str,
    pub icon: &'static str,

    // Organization
    pub category: NodeCategory,
    pub tags: Vec<&'static str>,

    // Connectivity
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortDefinition>,

    /// Configuration holder referenced by other nodes instead of wired
    pub is_config_node: bool,
}

impl NodeMetadata {
    /// Create node metadata with sensible defaults
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            description,
            version: env!("CARGO_PKG_VERSION"),
            color: "#3FADB5",
            icon: "opcua.png",
            category,
            tags: vec![],
            inputs: vec![],
            outputs: vec![],
            is_config_node: false,
        }
    }

    /// Metadata for a configuration node: no ports, hidden category
    pub fn config(
        node_type: &'static str,
        display_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self::new(node_type, display_name, NodeCategory::opcua_config(), description)
            .with_config_node(true)
    }

    pub fn with_color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }

    pub fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PortDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_tags(mut self, tags: Vec<&'static str>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_config_node(mut self, is_config_node: bool) -> Self {
        self.is_config_node = is_config_node;
        self
    }
}

/// Node factory trait: palette metadata plus construction from persisted config
pub trait NodeFactory: Send + Sync {
    fn metadata() -> NodeMetadata
    where
        Self: Sized;

    /// Build a deployed instance from the host-persisted configuration object
    fn create(config: Value) -> Result<OpcUaNode, ConfigError>
    where
        Self: Sized;
}

type NodeCreator = fn(Value) -> Result<OpcUaNode, ConfigError>;
type MetadataProvider = fn() -> NodeMetadata;

/// Registry mapping node type names to their constructors
pub struct NodeRegistry {
    creators: BTreeMap<String, NodeCreator>,
    metadata_providers: BTreeMap<String, MetadataProvider>,
    categories: HashMap<NodeCategory, Vec<String>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            creators: BTreeMap::new(),
            metadata_providers: BTreeMap::new(),
            categories: HashMap::new(),
        }
    }

    /// Registry with every OPC UA node kind registered
    pub fn with_opcua_nodes() -> Self {
        use crate::nodes::opcua::{
            EndpointNodeFactory, EventNodeFactory, ItemNodeFactory, MethodNodeFactory,
        };

        let mut registry = Self::new();
        registry.register::<ItemNodeFactory>();
        registry.register::<EventNodeFactory>();
        registry.register::<MethodNodeFactory>();
        registry.register::<EndpointNodeFactory>();
        registry
    }

    /// Register a node factory
    pub fn register<T: NodeFactory + 'static>(&mut self) {
        let metadata = T::metadata();
        let node_type = metadata.node_type.to_string();
        debug!("Registering node type {}", node_type);

        self.creators.insert(node_type.clone(), T::create);
        self.metadata_providers.insert(node_type.clone(), T::metadata);

        self.categories
            .entry(metadata.category.clone())
            .or_default()
            .push(node_type);
    }

    /// Construct a node of `node_type` from its persisted configuration
    pub fn create_node(&self, node_type: &str, config: Value) -> Result<OpcUaNode, ConfigError> {
        let creator = self
            .creators
            .get(node_type)
            .ok_or_else(|| ConfigError::UnknownNodeType(node_type.to_string()))?;
        creator(config)
    }

    pub fn has_node_type(&self, node_type: &str) -> bool {
        self.creators.contains_key(node_type)
    }

    /// All registered node types, sorted
    pub fn node_types(&self) -> Vec<&str> {
        self.creators.keys().map(|s| s.as_str()).collect()
    }

    pub fn nodes_in_category(&self, category: &NodeCategory) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|types| types.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    /// Node types in `category` and any of its subcategories
    pub fn nodes_under(&self, category: &NodeCategory) -> Vec<&str> {
        let mut sections: Vec<_> = self
            .categories
            .iter()
            .filter(|(c, _)| *c == category || c.is_child_of(category))
            .collect();
        sections.sort_by(|(a, _), (b, _)| a.path().cmp(b.path()));
        sections
            .into_iter()
            .flat_map(|(_, types)| types.iter().map(|s| s.as_str()))
            .collect()
    }

    /// Palette sections as (`"OPC UA > Config"`, node types), ordered by category path
    pub fn palette(&self) -> Vec<(String, Vec<&str>)> {
        let mut categories: Vec<&NodeCategory> = self.categories.keys().collect();
        categories.sort_by(|a, b| a.path().cmp(b.path()));
        categories
            .into_iter()
            .map(|category| (category.display_string(), self.nodes_in_category(category)))
            .collect()
    }

    pub fn get_metadata(&self, node_type: &str) -> Option<NodeMetadata> {
        self.metadata_providers.get(node_type).map(|provider| provider())
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::interface::FlowNode;
    use serde_json::json;

    #[test]
    fn test_registry_lists_opcua_nodes() {
        let registry = NodeRegistry::with_opcua_nodes();
        assert_eq!(
            registry.node_types(),
            vec!["OpcUa-Endpoint", "OpcUa-Event", "OpcUa-Item", "OpcUa-Method"]
        );
        assert_eq!(
            registry.nodes_in_category(&NodeCategory::opcua()),
            vec!["OpcUa-Item", "OpcUa-Event", "OpcUa-Method"]
        );
        assert_eq!(
            registry.nodes_in_category(&NodeCategory::opcua_config()),
            vec!["OpcUa-Endpoint"]
        );
    }

    #[test]
    fn test_create_node_by_type() {
        let registry = NodeRegistry::with_opcua_nodes();
        let node = registry
            .create_node(
                "OpcUa-Item",
                json!({ "item": "ns=2;i=4", "datatype": "Double", "name": "Level" }),
            )
            .unwrap();
        assert_eq!(node.node_type(), "OpcUa-Item");
        assert_eq!(node.name(), "Level");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let registry = NodeRegistry::with_opcua_nodes();
        let err = registry.create_node("OpcUa-Client", json!({})).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNodeType(t) if t == "OpcUa-Client"));
    }

    #[test]
    fn test_metadata_lookup() {
        let registry = NodeRegistry::with_opcua_nodes();
        let endpoint = registry.get_metadata("OpcUa-Endpoint").unwrap();
        assert!(endpoint.is_config_node);
        assert!(endpoint.inputs.is_empty());
        assert!(registry.get_metadata("Missing").is_none());
    }

    #[test]
    fn test_hierarchical_categories() {
        let root = NodeCategory::opcua();
        let config = NodeCategory::opcua_config();
        assert!(config.is_child_of(&root));
        assert!(!root.is_child_of(&config));
        assert_eq!(config.display_string(), "OPC UA > Config");

        let registry = NodeRegistry::with_opcua_nodes();
        assert_eq!(
            registry.nodes_under(&root),
            vec!["OpcUa-Item", "OpcUa-Event", "OpcUa-Method", "OpcUa-Endpoint"]
        );
        assert_eq!(registry.nodes_under(&config), vec!["OpcUa-Endpoint"]);
    }

    #[test]
    fn test_palette_sections() {
        let registry = NodeRegistry::with_opcua_nodes();
        assert_eq!(
            registry.palette(),
            vec![
                ("OPC UA".to_string(), vec!["OpcUa-Item", "OpcUa-Event", "OpcUa-Method"]),
                ("OPC UA > Config".to_string(), vec!["OpcUa-Endpoint"]),
            ]
        );
    }
}
