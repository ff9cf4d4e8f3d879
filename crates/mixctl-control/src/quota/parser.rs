use regex::Regex;
use tracing::trace;

use mixctl_core::error::{MixctlError, Result};
use mixctl_core::{Attributes, QuotaRequirement};

use super::QuotaEvaluator;
use crate::config::{AttributeMatch, QuotaRule, QuotaSpec, StringMatch};

#[derive(Debug)]
enum CompiledStringMatch {
    Exact(String),
    Prefix(String),
    Regex(Regex),
}

impl CompiledStringMatch {
    fn is_match(&self, value: &str) -> bool {
        match self {
            CompiledStringMatch::Exact(s) => value == s.as_str(),
            CompiledStringMatch::Prefix(p) => value.starts_with(p.as_str()),
            CompiledStringMatch::Regex(r) => r.is_match(value),
        }
    }
}

/// AND of clauses over named attributes.
#[derive(Debug)]
struct CompiledMatch {
    clauses: Vec<(String, CompiledStringMatch)>,
}

impl CompiledMatch {
    fn is_match(&self, attributes: &Attributes) -> bool {
        self.clauses.iter().all(|(name, m)| {
            attributes
                .get_str(name)
                .map_or(false, |value| m.is_match(value))
        })
    }
}

#[derive(Debug)]
struct CompiledRule {
    /// OR of matches; empty => always applies.
    matches: Vec<CompiledMatch>,
    requirements: Vec<QuotaRequirement>,
}

impl CompiledRule {
    fn applies(&self, attributes: &Attributes) -> bool {
        self.matches.is_empty() || self.matches.iter().any(|m| m.is_match(attributes))
    }
}

/// Compiled [`QuotaSpec`]. Every applicable rule contributes, in rule order.
#[derive(Debug)]
pub struct QuotaSpecParser {
    rules: Vec<CompiledRule>,
}

impl QuotaSpecParser {
    pub fn new(spec: &QuotaSpec) -> Result<Self> {
        let rules = spec
            .rules
            .iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }
}

impl QuotaEvaluator for QuotaSpecParser {
    fn get_requirements(&self, attributes: &Attributes, out: &mut Vec<QuotaRequirement>) {
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.applies(attributes) {
                trace!(rule = idx, quotas = rule.requirements.len(), "quota rule matched");
                out.extend(rule.requirements.iter().cloned());
            }
        }
    }
}

fn compile_rule(rule: &QuotaRule) -> Result<CompiledRule> {
    let matches = rule
        .matches
        .iter()
        .map(compile_match)
        .collect::<Result<Vec<_>>>()?;

    let mut requirements = Vec::with_capacity(rule.quotas.len());
    for q in &rule.quotas {
        if q.quota.is_empty() {
            return Err(MixctlError::InvalidQuotaSpec("quota name must not be empty".into()));
        }
        if q.charge <= 0 {
            return Err(MixctlError::InvalidQuotaSpec(format!(
                "quota {}: charge must be positive (got {})",
                q.quota, q.charge
            )));
        }
        requirements.push(QuotaRequirement::new(q.quota.clone(), q.charge));
    }

    Ok(CompiledRule {
        matches,
        requirements,
    })
}

fn compile_match(m: &AttributeMatch) -> Result<CompiledMatch> {
    let mut clauses = Vec::with_capacity(m.clause.len());
    for (name, sm) in &m.clause {
        clauses.push((name.clone(), compile_string_match(name, sm)?));
    }
    Ok(CompiledMatch { clauses })
}

fn compile_string_match(name: &str, sm: &StringMatch) -> Result<CompiledStringMatch> {
    match (&sm.exact, &sm.prefix, &sm.regex) {
        (Some(e), None, None) => Ok(CompiledStringMatch::Exact(e.clone())),
        (None, Some(p), None) => Ok(CompiledStringMatch::Prefix(p.clone())),
        (None, None, Some(r)) => {
            let re = Regex::new(&format!("^(?:{r})$")).map_err(|e| {
                MixctlError::InvalidQuotaSpec(format!("clause {name}: invalid regex {r}: {e}"))
            })?;
            Ok(CompiledStringMatch::Regex(re))
        }
        _ => Err(MixctlError::InvalidQuotaSpec(format!(
            "clause {name}: exactly one of exact, prefix or regex is required"
        ))),
    }
}
