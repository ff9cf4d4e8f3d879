use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use mixctl_core::error::{MixctlError, Result};
use mixctl_core::Attributes;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlConfig {
    pub version: u32,

    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

impl ControlConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MixctlError::UnsupportedVersion);
        }

        let mut seen = HashSet::with_capacity(self.services.len());
        for svc in &self.services {
            if svc.name.is_empty() {
                return Err(MixctlError::InvalidConfig("services[].name must not be empty".into()));
            }
            if !seen.insert(svc.name.as_str()) {
                return Err(MixctlError::InvalidConfig(format!(
                    "duplicate service name: {}",
                    svc.name
                )));
            }
        }

        if let Some(default) = &self.client.default_destination_service {
            if !seen.contains(default.as_str()) {
                return Err(MixctlError::InvalidConfig(format!(
                    "client.default_destination_service refers to unknown service: {default}"
                )));
            }
        }

        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9091".into()
}

/// Global (client-scope) settings shared by every service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Service used when a request names no destination.
    #[serde(default)]
    pub default_destination_service: Option<String>,

    /// Baseline attributes applied to every service.
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub name: String,

    #[serde(default)]
    pub disable_check_calls: bool,

    #[serde(default)]
    pub disable_report_calls: bool,

    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default)]
    pub api_specs: Vec<ApiSpec>,

    #[serde(default)]
    pub quota_specs: Vec<QuotaSpec>,
}

/// HTTP API description: route patterns and the attributes they produce.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSpec {
    /// Added for every matching pattern of this spec.
    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default)]
    pub patterns: Vec<ApiPattern>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiPattern {
    /// HTTP method, or `*` for any.
    pub method: String,

    #[serde(default)]
    pub uri_template: Option<String>,

    #[serde(default)]
    pub regex: Option<String>,

    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaSpec {
    #[serde(default)]
    pub rules: Vec<QuotaRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaRule {
    /// OR of attribute matches; empty means "always".
    #[serde(default, rename = "match")]
    pub matches: Vec<AttributeMatch>,

    #[serde(default)]
    pub quotas: Vec<Quota>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeMatch {
    /// AND of per-attribute string matches.
    #[serde(default)]
    pub clause: BTreeMap<String, StringMatch>,
}

/// String matcher for one attribute. Exactly one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringMatch {
    #[serde(default)]
    pub exact: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub regex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quota {
    pub quota: String,
    #[serde(default = "default_charge")]
    pub charge: i64,
}

fn default_charge() -> i64 {
    1
}
