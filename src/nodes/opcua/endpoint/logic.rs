//! Endpoint settings resolved once at deploy time

use std::fmt;

use log::{debug, warn};

use crate::types::{resolve_mode, resolve_policy, MessageSecurityMode, SecurityPolicy};

use super::parameters::EndpointConfig;

/// How the client authenticates its session
#[derive(Clone, PartialEq)]
pub enum UserIdentity {
    Anonymous,
    UserName { user: String, password: String },
}

impl fmt::Debug for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserIdentity::Anonymous => f.write_str("Anonymous"),
            UserIdentity::UserName { user, .. } => f
                .debug_struct("UserName")
                .field("user", user)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Connection parameters read by the client node when it connects
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointNode {
    pub name: String,
    pub endpoint_url: String,
    pub security_policy: SecurityPolicy,
    pub security_mode: MessageSecurityMode,
    identity: UserIdentity,
}

impl EndpointNode {
    pub fn new(config: EndpointConfig) -> Self {
        let security_policy = resolve_policy(&config.secpolicy);
        let security_mode = resolve_mode(&config.secmode);

        let identity = match (config.login, config.credentials) {
            (true, Some(credentials)) if !credentials.user.is_empty() => UserIdentity::UserName {
                user: credentials.user,
                password: credentials.password,
            },
            (true, _) => {
                warn!(
                    "Endpoint {} has login enabled but no user, connecting anonymously",
                    config.endpoint
                );
                UserIdentity::Anonymous
            }
            (false, _) => UserIdentity::Anonymous,
        };

        debug!(
            "Endpoint {} resolved to policy {:?} mode {:?}",
            config.endpoint, security_policy, security_mode
        );

        Self {
            name: config.name,
            endpoint_url: config.endpoint,
            security_policy,
            security_mode,
            identity,
        }
    }

    pub fn user_identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn is_secure(&self) -> bool {
        self.security_policy != SecurityPolicy::None
            && self.security_mode != MessageSecurityMode::None
    }
}
