//! Shared application state for the mixctl control binary.

use std::sync::Arc;

use mixctl_core::error::Result;

use crate::config::ControlConfig;
use crate::controller::Controller;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    controller: Controller,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report config errors without panicking.
    pub fn new(cfg: &ControlConfig) -> Result<Self> {
        let controller = Controller::new(cfg)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { controller }),
        })
    }

    pub fn controller(&self) -> &Controller {
        &self.inner.controller
    }
}
