//! Method node message shaping

use log::debug;

use crate::error::CoercionError;
use crate::nodes::interface::{Message, MethodArgument};
use crate::types::coerce_str;

use super::parameters::MethodConfig;

/// Deployed method node: prepares a method call for the client
#[derive(Debug, Clone)]
pub struct MethodNode {
    config: MethodConfig,
}

impl MethodNode {
    pub fn new(config: MethodConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MethodConfig {
        &self.config
    }

    /// Coerce the configured arguments
    pub fn input_arguments(&self) -> Result<Vec<MethodArgument>, CoercionError> {
        self.config
            .arguments()
            .into_iter()
            .map(|(datatype, value)| -> Result<MethodArgument, CoercionError> {
                Ok(MethodArgument {
                    data_type: datatype.to_string(),
                    value: coerce_str(datatype, value)?.to_json(),
                })
            })
            .collect()
    }

    /// Arguments already on the inbound message are sent as they are
    pub fn process(&self, mut msg: Message) -> Result<Message, CoercionError> {
        if msg.input_arguments.is_none() {
            msg.input_arguments = Some(self.input_arguments()?);
        }

        msg.topic = Some(self.config.objectid.clone());
        msg.object_id = Some(self.config.objectid.clone());
        msg.method_id = Some(self.config.methodid.clone());

        debug!(
            "Method {} on {} with {} argument(s)",
            self.config.methodid,
            self.config.objectid,
            msg.input_arguments.as_ref().map_or(0, Vec::len)
        );
        Ok(msg)
    }
}
