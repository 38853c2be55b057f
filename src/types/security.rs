//! Endpoint security settings and how persisted strings resolve to them
//!
//! The policy and mode types come from the `opcua` stack. This module only
//! adds the persisted spellings used by the endpoint form and the rule that
//! anything unrecognized downgrades to `None`.

use std::str::FromStr;

use log::warn;

pub use opcua::crypto::SecurityPolicy;
pub use opcua::types::MessageSecurityMode;

const POLICY_URI_PREFIX: &str = "http://opcfoundation.org/UA/SecurityPolicy#";

fn lookup_policy(raw: &str) -> SecurityPolicy {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return SecurityPolicy::Unknown;
    }
    if trimmed.starts_with(POLICY_URI_PREFIX) {
        return SecurityPolicy::from_uri(trimmed);
    }
    // The form persists the URI fragment (`Aes128_Sha256_RsaOaep`), the stack
    // names it `Aes128-Sha256-RsaOaep`; try both.
    match SecurityPolicy::from_str(trimmed) {
        Ok(policy) if policy != SecurityPolicy::Unknown => policy,
        _ => SecurityPolicy::from_uri(&format!("{}{}", POLICY_URI_PREFIX, trimmed)),
    }
}

/// Resolve a short name or full policy URI, falling back to the weakest policy
pub fn resolve_policy(raw: &str) -> SecurityPolicy {
    match lookup_policy(raw) {
        SecurityPolicy::Unknown => {
            warn!("Unknown security policy '{}', using None", raw);
            SecurityPolicy::None
        }
        policy => policy,
    }
}

/// Resolve the persisted mode (`NONE`, `SIGN`, `SIGNANDENCRYPT`), falling back to `NONE`
pub fn resolve_mode(raw: &str) -> MessageSecurityMode {
    match raw.trim().to_ascii_uppercase().as_str() {
        "NONE" => MessageSecurityMode::None,
        "SIGN" => MessageSecurityMode::Sign,
        "SIGNANDENCRYPT" => MessageSecurityMode::SignAndEncrypt,
        _ => {
            warn!("Unknown security mode '{}', using NONE", raw);
            MessageSecurityMode::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_short_names_and_uris() {
        assert_eq!(resolve_policy("Basic256Sha256"), SecurityPolicy::Basic256Sha256);
        assert_eq!(
            resolve_policy("http://opcfoundation.org/UA/SecurityPolicy#Basic256"),
            SecurityPolicy::Basic256
        );
        assert_eq!(resolve_policy("Aes128_Sha256_RsaOaep"), SecurityPolicy::Aes128Sha256RsaOaep);
        assert_eq!(
            resolve_policy(SecurityPolicy::Aes256Sha256RsaPss.to_uri()),
            SecurityPolicy::Aes256Sha256RsaPss
        );
    }

    #[test]
    fn test_unknown_policy_falls_back_to_none() {
        assert_eq!(resolve_policy("Basic512"), SecurityPolicy::None);
        assert_eq!(resolve_policy(""), SecurityPolicy::None);
        assert_eq!(
            resolve_policy("http://opcfoundation.org/UA/SecurityPolicy#Basic512"),
            SecurityPolicy::None
        );
    }

    #[test]
    fn test_security_mode_resolution() {
        assert_eq!(resolve_mode("SIGN"), MessageSecurityMode::Sign);
        assert_eq!(resolve_mode("signandencrypt"), MessageSecurityMode::SignAndEncrypt);
        assert_eq!(resolve_mode("ENCRYPT"), MessageSecurityMode::None);
        assert_eq!(resolve_mode(""), MessageSecurityMode::None);
    }
}
