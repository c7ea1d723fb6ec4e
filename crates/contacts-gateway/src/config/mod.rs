//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use contacts_core::error::{ContactsError, Result};

pub use schema::{
    AuthSection, ClaimConfig, DocsSection, GatewayConfig, GatewaySection, JwtConfig, PolicyConfig,
    StaticTokenConfig, VersioningSection,
};

/// Environment variable naming the config file used by the binary.
pub const CONFIG_PATH_ENV: &str = "CONTACTS_CONFIG";
/// Config file used when `CONTACTS_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "contacts.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ContactsError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| ContactsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
