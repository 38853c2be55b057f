//! Endpoint configuration node fields as persisted by the host

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::nodes::opcua::{flag_field, text_field};

/// Credential pair stored by the host next to the endpoint config
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, deserialize_with = "text_field")]
    pub user: String,
    #[serde(default, deserialize_with = "text_field")]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Persisted fields: `{endpoint, secpolicy, secmode, login}` plus credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Server URL, e.g. `opc.tcp://plc:4840`
    #[serde(default, deserialize_with = "text_field")]
    pub endpoint: String,

    #[serde(default, deserialize_with = "text_field")]
    pub secpolicy: String,

    #[serde(default, deserialize_with = "text_field")]
    pub secmode: String,

    /// Authenticate with the credential pair instead of anonymously
    #[serde(default, deserialize_with = "flag_field")]
    pub login: bool,

    #[serde(default)]
    pub credentials: Option<Credentials>,

    #[serde(default, deserialize_with = "text_field")]
    pub name: String,
}
