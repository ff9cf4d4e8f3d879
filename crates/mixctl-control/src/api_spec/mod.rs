//! Route evaluators (HTTP API spec layer).
//!
//! An API spec maps `(method, path)` onto operation attributes. Specs are
//! compiled once into [`RouteEvaluator`]s; compilation is where malformed
//! templates and regexes are rejected.

pub mod parser;
pub mod template;

use mixctl_core::error::Result;
use mixctl_core::Attributes;

use crate::config::ApiSpec;

pub use parser::HttpApiSpecParser;
pub use template::UriTemplate;

/// Contributes attributes derived from the request method and path.
pub trait RouteEvaluator: Send + Sync {
    /// Merge this evaluator's contribution into `attributes`.
    fn add_attributes(&self, method: &str, path: &str, attributes: &mut Attributes);
}

/// Build the route evaluator for one API spec.
pub fn create(spec: &ApiSpec) -> Result<Box<dyn RouteEvaluator>> {
    Ok(Box::new(HttpApiSpecParser::new(spec)?))
}
