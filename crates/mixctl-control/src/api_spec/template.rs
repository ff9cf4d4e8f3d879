//! URI template compilation and matching.
//!
//! Grammar (HTTP rule style):
//! - `/`-separated segments: literal, `*` (one segment), `**` (zero or more
//!   trailing segments)
//! - `{var}` binds one segment; `{var=sub/pattern}` binds an inline
//!   sub-pattern built from the same segment kinds
//! - optional `:verb` suffix on the final segment
//!
//! Variable bindings are not extracted: only whether the path matches
//! matters to attribute derivation.

use mixctl_core::error::{MixctlError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Single,
    Multi,
}

/// Compiled URI template.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    segments: Vec<Segment>,
    verb: Option<String>,
}

impl UriTemplate {
    pub fn parse(raw: &str) -> Result<Self> {
        let body = raw
            .strip_prefix('/')
            .ok_or_else(|| invalid(raw, "must start with '/'"))?;

        let (body, verb) = split_verb(raw, body)?;

        let mut segments = Vec::new();
        if !body.is_empty() {
            for piece in split_top_level(raw, body)? {
                if let Some(inner) = piece.strip_prefix('{') {
                    let inner = inner
                        .strip_suffix('}')
                        .ok_or_else(|| invalid(raw, "malformed variable"))?;
                    parse_variable(raw, inner, &mut segments)?;
                } else {
                    segments.push(parse_segment(raw, piece)?);
                }
            }
        }

        if let Some(pos) = segments.iter().position(|s| *s == Segment::Multi) {
            if pos + 1 != segments.len() {
                return Err(invalid(raw, "'**' is only allowed as the last segment"));
            }
        }

        Ok(Self {
            segments,
            verb,
        })
    }

    /// Match a request path. Query string and fragment must already be
    /// stripped.
    pub fn matches(&self, path: &str) -> bool {
        let Some(body) = path.strip_prefix('/') else {
            return false;
        };

        let body = match &self.verb {
            Some(verb) => match body
                .strip_suffix(verb.as_str())
                .and_then(|b| b.strip_suffix(':'))
            {
                Some(b) => b,
                None => return false,
            },
            None => body,
        };

        let parts: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').collect()
        };

        let mut i = 0;
        for seg in &self.segments {
            match seg {
                Segment::Multi => return true,
                Segment::Single => match parts.get(i) {
                    Some(p) if !p.is_empty() => {}
                    _ => return false,
                },
                Segment::Literal(lit) => match parts.get(i) {
                    Some(p) if *p == lit.as_str() => {}
                    _ => return false,
                },
            }
            i += 1;
        }
        i == parts.len()
    }
}

fn invalid(raw: &str, why: &str) -> MixctlError {
    MixctlError::InvalidApiSpec(format!("uri_template {raw}: {why}"))
}

/// Split off a trailing `:verb` that sits outside braces, after the last `/`.
fn split_verb<'a>(raw: &str, body: &'a str) -> Result<(&'a str, Option<String>)> {
    let mut depth = 0usize;
    let mut colon = None;
    for (idx, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.checked_sub(1).ok_or_else(|| invalid(raw, "unbalanced '}'"))?,
            '/' if depth == 0 => colon = None,
            ':' if depth == 0 => colon = Some(idx),
            _ => {}
        }
    }
    if depth != 0 {
        return Err(invalid(raw, "unbalanced '{'"));
    }

    match colon {
        Some(idx) => {
            let verb = &body[idx + 1..];
            if verb.is_empty() || verb.contains(['*', '{', '}']) {
                return Err(invalid(raw, "invalid verb"));
            }
            Ok((&body[..idx], Some(verb.to_string())))
        }
        None => Ok((body, None)),
    }
}

/// Split on `/` outside braces.
fn split_top_level<'a>(raw: &str, body: &'a str) -> Result<Vec<&'a str>> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in body.char_indices() {
        match c {
            '{' => {
                depth += 1;
                if depth > 1 {
                    return Err(invalid(raw, "nested variables are not allowed"));
                }
            }
            '}' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                out.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    out.push(&body[start..]);
    Ok(out)
}

fn parse_variable(raw: &str, inner: &str, out: &mut Vec<Segment>) -> Result<()> {
    let (name, pattern) = match inner.split_once('=') {
        Some((n, p)) => (n, p),
        None => (inner, "*"),
    };

    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if !valid_name {
        return Err(invalid(raw, "invalid variable name"));
    }
    if pattern.is_empty() {
        return Err(invalid(raw, "empty variable pattern"));
    }

    for piece in pattern.split('/') {
        out.push(parse_segment(raw, piece)?);
    }
    Ok(())
}

fn parse_segment(raw: &str, piece: &str) -> Result<Segment> {
    match piece {
        "" => Err(invalid(raw, "empty segment")),
        "*" => Ok(Segment::Single),
        "**" => Ok(Segment::Multi),
        p if p.contains(['{', '}', '*', '=']) => Err(invalid(raw, "invalid segment")),
        p => Ok(Segment::Literal(p.to_string())),
    }
}
