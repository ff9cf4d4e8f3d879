use regex::Regex;
use tracing::trace;

use mixctl_core::error::{MixctlError, Result};
use mixctl_core::Attributes;

use super::template::UriTemplate;
use super::RouteEvaluator;
use crate::config::{ApiPattern, ApiSpec};

#[derive(Debug)]
enum PathMatcher {
    Template(UriTemplate),
    Regex(Regex),
}

impl PathMatcher {
    fn is_match(&self, path: &str) -> bool {
        match self {
            PathMatcher::Template(t) => t.matches(path),
            PathMatcher::Regex(r) => r.is_match(path),
        }
    }
}

/// One pattern with its effective attributes precomputed.
#[derive(Debug)]
struct CompiledPattern {
    /// `None` => any method.
    method: Option<String>,
    matcher: PathMatcher,
    attributes: Attributes,
}

/// Compiled [`ApiSpec`]. Patterns are tried in declaration order and the
/// first match contributes its attributes.
#[derive(Debug)]
pub struct HttpApiSpecParser {
    patterns: Vec<CompiledPattern>,
}

impl HttpApiSpecParser {
    pub fn new(spec: &ApiSpec) -> Result<Self> {
        let patterns = spec
            .patterns
            .iter()
            .map(|p| compile_pattern(&spec.attributes, p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Attributes of the first pattern matching `method` and `path`.
    pub fn matched_attributes(&self, method: &str, path: &str) -> Option<&Attributes> {
        let path = strip_query(path);
        self.patterns
            .iter()
            .find(|p| {
                p.method.as_deref().map_or(true, |m| m == method) && p.matcher.is_match(path)
            })
            .map(|p| &p.attributes)
    }
}

impl RouteEvaluator for HttpApiSpecParser {
    fn add_attributes(&self, method: &str, path: &str, attributes: &mut Attributes) {
        if let Some(matched) = self.matched_attributes(method, path) {
            trace!(method, path, added = matched.len(), "api pattern matched");
            attributes.merge_from(matched);
        }
    }
}

fn compile_pattern(spec_attributes: &Attributes, p: &ApiPattern) -> Result<CompiledPattern> {
    let method = match p.method.as_str() {
        "" => {
            return Err(MixctlError::InvalidApiSpec("pattern method must not be empty".into()));
        }
        "*" => None,
        m => Some(m.to_string()),
    };

    let matcher = match (&p.uri_template, &p.regex) {
        (Some(t), None) => PathMatcher::Template(UriTemplate::parse(t)?),
        (None, Some(r)) => {
            let anchored = format!("^(?:{r})$");
            let re = Regex::new(&anchored)
                .map_err(|e| MixctlError::InvalidApiSpec(format!("invalid regex {r}: {e}")))?;
            PathMatcher::Regex(re)
        }
        _ => {
            return Err(MixctlError::InvalidApiSpec(
                "pattern needs exactly one of uri_template or regex".into(),
            ));
        }
    };

    // Pattern attributes win over the spec-wide ones.
    let mut attributes = spec_attributes.clone();
    attributes.merge_from(&p.attributes);

    Ok(CompiledPattern {
        method,
        matcher,
        attributes,
    })
}

fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}
