//! Method node configuration as persisted by the host

use serde::{Deserialize, Serialize};

use crate::constants::MAX_METHOD_ARGUMENTS;
use crate::nodes::opcua::text_field;

/// Persisted fields: object and method ids plus up to three typed arguments
/// (`arg0type`/`arg0value` .. `arg2type`/`arg2value`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    /// Object the method is called on
    #[serde(default, deserialize_with = "text_field")]
    pub objectid: String,

    #[serde(default, deserialize_with = "text_field")]
    pub methodid: String,

    #[serde(default, deserialize_with = "text_field")]
    pub name: String,

    #[serde(default, deserialize_with = "text_field")]
    pub arg0type: String,
    #[serde(default, deserialize_with = "text_field")]
    pub arg0value: String,
    #[serde(default, deserialize_with = "text_field")]
    pub arg1type: String,
    #[serde(default, deserialize_with = "text_field")]
    pub arg1value: String,
    #[serde(default, deserialize_with = "text_field")]
    pub arg2type: String,
    #[serde(default, deserialize_with = "text_field")]
    pub arg2value: String,
}

impl MethodConfig {
    /// Configured (datatype, value) pairs in order; slots without a type are skipped
    pub fn arguments(&self) -> Vec<(&str, &str)> {
        let slots: [(&str, &str); MAX_METHOD_ARGUMENTS] = [
            (&self.arg0type, &self.arg0value),
            (&self.arg1type, &self.arg1value),
            (&self.arg2type, &self.arg2value),
        ];
        slots
            .into_iter()
            .map(|(datatype, value)| (datatype.trim(), value))
            .filter(|(datatype, _)| !datatype.is_empty())
            .collect()
    }
}
