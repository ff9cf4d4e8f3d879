//! Quota evaluators (quota spec layer).
//!
//! Quota specs select quota requirements from the attributes a request has
//! accumulated so far. They run after static and route attributes are in
//! place.

pub mod parser;

use mixctl_core::error::Result;
use mixctl_core::{Attributes, QuotaRequirement};

use crate::config::QuotaSpec;

pub use parser::QuotaSpecParser;

/// Appends the quota requirements that apply to `attributes`.
pub trait QuotaEvaluator: Send + Sync {
    fn get_requirements(&self, attributes: &Attributes, out: &mut Vec<QuotaRequirement>);
}

/// Build the quota evaluator for one quota spec.
pub fn create(spec: &QuotaSpec) -> Result<Box<dyn QuotaEvaluator>> {
    Ok(Box::new(QuotaSpecParser::new(spec)?))
}
