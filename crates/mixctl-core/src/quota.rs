//! Quota requirements handed to the policy-decision caller.

use serde::{Deserialize, Serialize};

/// One quota to check/consume for a request.
///
/// Duplicates are legal: the decision engine owns aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaRequirement {
    /// Quota name as known to the decision engine.
    pub quota: String,
    /// Amount to charge.
    pub charge: i64,
}

impl QuotaRequirement {
    pub fn new(quota: impl Into<String>, charge: i64) -> Self {
        Self {
            quota: quota.into(),
            charge,
        }
    }
}
