//! Item node configuration as persisted by the host

use serde::{Deserialize, Serialize};

use crate::nodes::opcua::text_field;

/// Persisted fields of an item node: `{item, datatype, value, name}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Node address, e.g. `ns=2;i=4`
    #[serde(default, deserialize_with = "text_field")]
    pub item: String,

    /// Datatype name used to coerce values, e.g. `Double` or `Int32 Array`
    #[serde(default, deserialize_with = "text_field")]
    pub datatype: String,

    /// Static value sent when an input arrives with an empty payload
    #[serde(default, deserialize_with = "text_field")]
    pub value: String,

    #[serde(default, deserialize_with = "text_field")]
    pub name: String,
}

impl ItemConfig {
    pub fn has_static_value(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn configured_datatype(&self) -> Option<&str> {
        Some(self.datatype.trim()).filter(|dt| !dt.is_empty())
    }
}
