//! URI template grammar and HTTP API spec matching.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mixctl_control::api_spec::{HttpApiSpecParser, RouteEvaluator, UriTemplate};
use mixctl_control::config::ApiSpec;
use mixctl_core::Attributes;

fn template(raw: &str) -> UriTemplate {
    UriTemplate::parse(raw).unwrap()
}

fn spec(yaml: &str) -> HttpApiSpecParser {
    let spec: ApiSpec = serde_yaml::from_str(yaml).unwrap();
    HttpApiSpecParser::new(&spec).unwrap()
}

#[test]
fn literal_and_single_segments() {
    let t = template("/v1/shelves/{shelf}/books/*");
    assert!(t.matches("/v1/shelves/s1/books/b1"));
    assert!(!t.matches("/v1/shelves/s1/books"));
    assert!(!t.matches("/v1/shelves/s1/books/b1/extra"));
    assert!(!t.matches("/v1/shelves//books/b1"));
    assert!(!t.matches("v1/shelves/s1/books/b1"));
}

#[test]
fn double_wildcard_matches_rest() {
    let t = template("/static/**");
    assert!(t.matches("/static"));
    assert!(t.matches("/static/a"));
    assert!(t.matches("/static/a/b/c.css"));
    assert!(!t.matches("/other/a"));
}

#[test]
fn variable_with_sub_pattern() {
    let t = template("/v1/{name=shelves/*/books/*}");
    assert!(t.matches("/v1/shelves/1/books/2"));
    assert!(!t.matches("/v1/shelves/1"));

    let rest = template("/files/{path=**}");
    assert!(rest.matches("/files/a/b/c"));
}

#[test]
fn verb_suffix() {
    let t = template("/v1/books/{book}:publish");
    assert!(t.matches("/v1/books/7:publish"));
    assert!(!t.matches("/v1/books/7"));
    assert!(!t.matches("/v1/books/7:archive"));
}

#[test]
fn root_template() {
    let t = template("/");
    assert!(t.matches("/"));
    assert!(!t.matches("/a"));
}

#[test]
fn rejects_malformed_templates() {
    for raw in [
        "v1/no/leading/slash",
        "/v1/{unclosed",
        "/v1/closed}",
        "/v1/{}",
        "/v1/{a={b}}",
        "/v1/**/tail",
        "/v1//double",
        "/v1/{name=}",
        "/v1/x:",
    ] {
        let err = UriTemplate::parse(raw).expect_err(raw);
        assert_eq!(err.code().as_str(), "INVALID_API_SPEC", "{raw}");
    }
}

#[test]
fn first_matching_pattern_wins_and_inherits_spec_attributes() {
    let parser = spec(
        r#"
attributes:
  api.service: bookstore
  api.version: v1
patterns:
  - method: GET
    uri_template: /v1/books/{book}
    attributes: { api.operation: GetBook, api.version: v1beta }
  - method: "*"
    uri_template: /v1/books/**
    attributes: { api.operation: AnyBook }
"#,
    );

    let mut attrs = Attributes::new();
    parser.add_attributes("GET", "/v1/books/1?fields=title", &mut attrs);
    assert_eq!(attrs.get_str("api.operation"), Some("GetBook"));
    assert_eq!(attrs.get_str("api.service"), Some("bookstore"));
    assert_eq!(attrs.get_str("api.version"), Some("v1beta"));

    let mut attrs = Attributes::new();
    parser.add_attributes("DELETE", "/v1/books/1", &mut attrs);
    assert_eq!(attrs.get_str("api.operation"), Some("AnyBook"));
    assert_eq!(attrs.get_str("api.version"), Some("v1"));
}

#[test]
fn regex_patterns_match_whole_path() {
    let parser = spec(
        r#"
patterns:
  - method: POST
    regex: "/admin/[a-z]+"
    attributes: { api.operation: Admin }
"#,
    );

    let mut attrs = Attributes::new();
    parser.add_attributes("POST", "/admin/users", &mut attrs);
    assert_eq!(attrs.get_str("api.operation"), Some("Admin"));

    let mut attrs = Attributes::new();
    parser.add_attributes("POST", "/v2/admin/users", &mut attrs);
    assert!(attrs.is_empty());
}

#[test]
fn no_match_contributes_nothing() {
    let parser = spec(
        r#"
attributes: { api.service: bookstore }
patterns:
  - method: GET
    uri_template: /v1/books
"#,
    );
    let mut attrs = Attributes::new();
    attrs.insert("keep", "me");
    parser.add_attributes("get", "/v1/books", &mut attrs);
    assert_eq!(attrs.len(), 1);
}

#[test]
fn rejects_bad_patterns() {
    for yaml in [
        "patterns: [{ method: GET }]",
        "patterns: [{ method: GET, uri_template: /a, regex: /a }]",
        "patterns: [{ method: '', uri_template: /a }]",
        "patterns: [{ method: GET, regex: '(' }]",
    ] {
        let s: ApiSpec = serde_yaml::from_str(yaml).unwrap();
        let err = HttpApiSpecParser::new(&s).expect_err(yaml);
        assert_eq!(err.code().as_str(), "INVALID_API_SPEC", "{yaml}");
    }
}

#[test]
fn declaration_order_beats_template_specificity() {
    let parser = spec(
        r#"
patterns:
  - method: GET
    uri_template: /v1/**
    attributes: { api.operation: CatchAll }
  - method: GET
    uri_template: /v1/books/{book}
    attributes: { api.operation: GetBook }
"#,
    );
    let mut attrs = Attributes::new();
    parser.add_attributes("GET", "/v1/books/1", &mut attrs);
    assert_eq!(attrs.get_str("api.operation"), Some("CatchAll"));
}
