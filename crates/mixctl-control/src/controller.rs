//! Service context registry.
//!
//! Holds one compiled [`ServiceContext`] per service name. Updates build the
//! new version off to the side and then swap the `Arc` in one step; requests
//! that already hold the previous `Arc` finish against it undisturbed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use mixctl_core::error::{MixctlError, Result};

use crate::config::{ControlConfig, ServiceConfig};
use crate::context::{ClientContext, ServiceContext};
use crate::request::{CheckData, RequestContext};

pub struct Controller {
    client: ClientContext,
    services: DashMap<String, Arc<ServiceContext>>,
    next_version: AtomicU64,
}

impl Controller {
    /// Compile every configured service. Any failure rejects the whole
    /// config; nothing is registered.
    pub fn new(cfg: &ControlConfig) -> Result<Self> {
        cfg.validate()?;
        let client = ClientContext::new(cfg.client.clone());

        let mut built = Vec::with_capacity(cfg.services.len());
        for (idx, svc) in cfg.services.iter().enumerate() {
            let version = idx as u64 + 1;
            let ctx = ServiceContext::new(&client, svc)?.with_version(version);
            built.push(ctx);
        }

        let services = DashMap::with_capacity(built.len());
        for ctx in built {
            services.insert(ctx.name().to_string(), Arc::new(ctx));
        }

        tracing::info!(services = services.len(), "controller ready");

        Ok(Self {
            client,
            next_version: AtomicU64::new(cfg.services.len() as u64 + 1),
            services,
        })
    }

    /// Resolve the context for `service`, falling back to the client's
    /// default destination when no name is given.
    pub fn service_context(&self, service: Option<&str>) -> Result<Arc<ServiceContext>> {
        let name = service
            .or_else(|| self.client.default_destination_service())
            .ok_or_else(|| MixctlError::UnknownService("no service named and no default".into()))?;

        self.services
            .get(name)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| MixctlError::UnknownService(name.to_string()))
    }

    /// Build a new version of one service and swap it in. On error the
    /// current version stays registered. If a concurrent update registered
    /// a newer version first, the returned context is not registered.
    pub fn update_service(&self, config: &ServiceConfig) -> Result<Arc<ServiceContext>> {
        if config.name.is_empty() {
            return Err(MixctlError::InvalidConfig("service name must not be empty".into()));
        }

        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let ctx = Arc::new(ServiceContext::new(&self.client, config)?.with_version(version));

        // Builds may finish out of order; only a newer version may replace
        // the registered one.
        match self.services.entry(config.name.clone()) {
            Entry::Occupied(mut e) => {
                let current = e.get().version();
                if current < version {
                    e.insert(Arc::clone(&ctx));
                    tracing::info!(
                        service = %config.name,
                        from = current,
                        to = version,
                        "service context replaced"
                    );
                } else {
                    tracing::debug!(
                        service = %config.name,
                        current,
                        version,
                        "service context superseded before swap"
                    );
                }
            }
            Entry::Vacant(e) => {
                e.insert(Arc::clone(&ctx));
                tracing::warn!(service = %config.name, version, "service context added at runtime");
            }
        }

        Ok(ctx)
    }

    pub fn remove_service(&self, name: &str) -> Option<Arc<ServiceContext>> {
        let removed = self.services.remove(name).map(|(_, ctx)| ctx);
        if removed.is_some() && self.client.default_destination_service() == Some(name) {
            tracing::warn!(service = %name, "default destination service removed");
        }
        removed
    }

    /// Registered service names, sorted.
    pub fn service_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Resolve the service and run the full pipeline for one request.
    pub fn evaluate<C: CheckData + ?Sized>(
        &self,
        service: Option<&str>,
        check_data: &C,
    ) -> Result<(Arc<ServiceContext>, RequestContext)> {
        let ctx = self.service_context(service)?;
        let request = ctx.evaluate(check_data);
        Ok((ctx, request))
    }
}
