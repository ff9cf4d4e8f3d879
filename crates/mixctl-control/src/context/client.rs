use mixctl_core::Attributes;

use crate::config::ClientConfig;

/// Global (client-scope) state shared by all service contexts.
/// Service contexts copy its baseline when they are built.
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    config: ClientConfig,
}

impl ClientContext {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Baseline attributes merged into every service.
    pub fn attributes(&self) -> &Attributes {
        &self.config.attributes
    }

    pub fn default_destination_service(&self) -> Option<&str> {
        self.config.default_destination_service.as_deref()
    }
}
