//! Per-request workspace and the request data accessor.

use mixctl_core::{Attributes, QuotaRequirement};

/// Request header slots the control layer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// HTTP method (`:method`).
    Method,
    /// Request path including any query string (`:path`).
    Path,
}

/// Read access to the transport request.
///
/// A missing header is a normal outcome, never an error.
pub trait CheckData {
    fn find_request_header(&self, kind: HeaderKind) -> Option<String>;
}

/// Method/path pair already extracted by the caller.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    pub method: Option<String>,
    pub path: Option<String>,
}

impl RequestHeaders {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            path: Some(path.into()),
        }
    }
}

impl CheckData for RequestHeaders {
    fn find_request_header(&self, kind: HeaderKind) -> Option<String> {
        match kind {
            HeaderKind::Method => self.method.clone(),
            HeaderKind::Path => self.path.clone(),
        }
    }
}

/// Accumulator for one request: attributes plus ordered quota requirements.
/// Owned by a single request; never shared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub attributes: Attributes,
    pub quotas: Vec<QuotaRequirement>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }
}
