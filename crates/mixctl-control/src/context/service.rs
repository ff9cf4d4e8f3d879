use tracing::debug;

use mixctl_core::error::{MixctlError, Result};
use mixctl_core::Attributes;

use super::ClientContext;
use crate::api_spec::{self, RouteEvaluator};
use crate::config::ServiceConfig;
use crate::quota::{self, QuotaEvaluator};
use crate::request::{CheckData, HeaderKind, RequestContext};

/// Compiled, read-only evaluation pipeline for one service config version.
///
/// Nothing here is mutated after construction, so one instance is shared via
/// `Arc` by every in-flight request of that version. A config change builds a
/// new instance; it never patches this one.
pub struct ServiceContext {
    name: String,
    version: u64,
    enable_check: bool,
    enable_report: bool,
    /// Service attributes with the client baseline merged in.
    attributes: Attributes,
    api_spec_parsers: Vec<Box<dyn RouteEvaluator>>,
    quota_parsers: Vec<Box<dyn QuotaEvaluator>>,
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("attributes", &self.attributes)
            .field("num_api_specs", &self.api_spec_parsers.len())
            .field("num_quota_specs", &self.quota_parsers.len())
            .finish()
    }
}

impl ServiceContext {
    /// Compile `config` against the client baseline.
    ///
    /// Fails as a whole if any API or quota spec is malformed.
    pub fn new(client: &ClientContext, config: &ServiceConfig) -> Result<Self> {
        let api_spec_parsers = config
            .api_specs
            .iter()
            .map(api_spec::create)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| scoped(&config.name, e))?;

        let quota_parsers = config
            .quota_specs
            .iter()
            .map(quota::create)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| scoped(&config.name, e))?;

        let mut ctx = Self::from_parts(
            client,
            config.name.clone(),
            &config.attributes,
            api_spec_parsers,
            quota_parsers,
        );
        ctx.enable_check = !config.disable_check_calls;
        ctx.enable_report = !config.disable_report_calls;
        Ok(ctx)
    }

    /// Assemble a context from already-built evaluators.
    pub fn from_parts(
        client: &ClientContext,
        name: String,
        service_attributes: &Attributes,
        api_spec_parsers: Vec<Box<dyn RouteEvaluator>>,
        quota_parsers: Vec<Box<dyn QuotaEvaluator>>,
    ) -> Self {
        // Baseline is merged *into* the service set: on collision the
        // client value wins.
        let mut attributes = service_attributes.clone();
        attributes.merge_from(client.attributes());

        debug!(
            service = %name,
            attributes = attributes.len(),
            api_specs = api_spec_parsers.len(),
            quota_specs = quota_parsers.len(),
            "service context built"
        );

        Self {
            name,
            version: 0,
            enable_check: true,
            enable_report: true,
            attributes,
            api_spec_parsers,
            quota_parsers,
        }
    }

    /// Tag this context with a config version.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Merged static attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn enable_check(&self) -> bool {
        self.enable_check
    }

    pub fn enable_report(&self) -> bool {
        self.enable_report
    }

    /// Copy the merged static attributes into the request.
    pub fn add_static_attributes(&self, request: &mut RequestContext) {
        if !self.attributes.is_empty() {
            request.attributes.merge_from(&self.attributes);
        }
    }

    /// Run every route evaluator against the request method and path.
    /// Missing method or path contributes nothing.
    pub fn add_api_attributes<C: CheckData + ?Sized>(
        &self,
        check_data: &C,
        request: &mut RequestContext,
    ) {
        if self.api_spec_parsers.is_empty() {
            return;
        }
        let (Some(method), Some(path)) = (
            check_data.find_request_header(HeaderKind::Method),
            check_data.find_request_header(HeaderKind::Path),
        ) else {
            return;
        };
        for parser in &self.api_spec_parsers {
            parser.add_attributes(&method, &path, &mut request.attributes);
        }
    }

    /// Append quota requirements selected by the request's current
    /// attributes.
    pub fn add_quotas(&self, request: &mut RequestContext) {
        for parser in &self.quota_parsers {
            parser.get_requirements(&request.attributes, &mut request.quotas);
        }
    }

    /// Static, route, then quota: the full per-request pipeline.
    pub fn evaluate<C: CheckData + ?Sized>(&self, check_data: &C) -> RequestContext {
        let mut request = RequestContext::new();
        self.add_static_attributes(&mut request);
        self.add_api_attributes(check_data, &mut request);
        self.add_quotas(&mut request);
        request
    }
}

fn scoped(service: &str, e: MixctlError) -> MixctlError {
    match e {
        MixctlError::InvalidApiSpec(m) => MixctlError::InvalidApiSpec(format!("service {service}: {m}")),
        MixctlError::InvalidQuotaSpec(m) => {
            MixctlError::InvalidQuotaSpec(format!("service {service}: {m}"))
        }
        other => other,
    }
}
