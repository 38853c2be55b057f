//! Event node configuration as persisted by the host

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::node_ids;
use crate::nodes::opcua::{flag_field, text_field};

fn default_root() -> String {
    node_ids::SERVER.to_string()
}

/// A cleared root field subscribes at the Server object, like a missing one
fn root_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let root = text_field(deserializer)?;
    if root.trim().is_empty() {
        Ok(default_root())
    } else {
        Ok(root)
    }
}

/// Persisted fields: `{root, eventtype, customeventtype, activatecustomevent, name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Node the event subscription is rooted at
    #[serde(default = "default_root", deserialize_with = "root_field")]
    pub root: String,

    /// Standard event type id picked from the form
    #[serde(default, deserialize_with = "text_field")]
    pub eventtype: String,

    #[serde(default, deserialize_with = "text_field")]
    pub customeventtype: String,

    #[serde(default, deserialize_with = "flag_field")]
    pub activatecustomevent: bool,

    #[serde(default, deserialize_with = "text_field")]
    pub name: String,
}

impl EventConfig {
    /// Event type the subscription filters on
    pub fn event_type_id(&self) -> &str {
        if self.activatecustomevent {
            &self.customeventtype
        } else {
            &self.eventtype
        }
    }
}
