//! Control config loader (strict parsing).

pub mod schema;

use std::fs;

use mixctl_core::error::{MixctlError, Result};

pub use schema::{
    ApiPattern, ApiSpec, AttributeMatch, ClientConfig, ControlConfig, Quota, QuotaRule, QuotaSpec,
    ServiceConfig, StringMatch,
};

pub fn load_from_file(path: &str) -> Result<ControlConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MixctlError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ControlConfig> {
    let cfg: ControlConfig = serde_yaml::from_str(s)
        .map_err(|e| MixctlError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
