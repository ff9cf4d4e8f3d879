//! Attribute set merge and decoding tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use mixctl_core::{AttributeValue, Attributes};

#[test]
fn merge_disjoint_is_union() {
    let mut dst: Attributes = [("service", "billing")].into_iter().collect();
    let src: Attributes = [("region", "global")].into_iter().collect();

    dst.merge_from(&src);

    assert_eq!(dst.len(), 2);
    assert_eq!(dst.get_str("service"), Some("billing"));
    assert_eq!(dst.get_str("region"), Some("global"));
}

#[test]
fn merge_collision_source_wins() {
    let mut dst: Attributes = [("region", "eu"), ("service", "billing")].into_iter().collect();
    let src: Attributes = [("region", "global")].into_iter().collect();

    dst.merge_from(&src);

    assert_eq!(dst.get_str("region"), Some("global"));
    assert_eq!(dst.get_str("service"), Some("billing"));
}

#[test]
fn merge_replaces_value_of_different_type() {
    let mut dst = Attributes::new();
    dst.insert("port", "http");
    let mut src = Attributes::new();
    src.insert("port", 8080_i64);

    dst.merge_from(&src);

    assert_eq!(dst.get("port"), Some(&AttributeValue::Int64(8080)));
    assert_eq!(dst.get_str("port"), None);
}

#[test]
fn merge_empty_source_is_noop() {
    let mut dst: Attributes = [("a", "1")].into_iter().collect();
    let before = dst.clone();
    dst.merge_from(&Attributes::new());
    assert_eq!(dst, before);
}

#[test]
fn decode_untagged_yaml_values() {
    let yaml = r#"
source.name: frontend
request.size: 512
sample.rate: 0.25
mesh.enabled: true
labels:
  app: billing
  tier: backend
"#;
    let attrs: Attributes = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(attrs.get_str("source.name"), Some("frontend"));
    assert_eq!(attrs.get("request.size"), Some(&AttributeValue::Int64(512)));
    assert_eq!(attrs.get("sample.rate"), Some(&AttributeValue::Double(0.25)));
    assert_eq!(attrs.get("mesh.enabled"), Some(&AttributeValue::Bool(true)));

    let mut labels = BTreeMap::new();
    labels.insert("app".to_string(), "billing".to_string());
    labels.insert("tier".to_string(), "backend".to_string());
    assert_eq!(attrs.get("labels"), Some(&AttributeValue::StringMap(labels)));
}

#[test]
fn serializes_as_plain_map() {
    let attrs: Attributes = [("api", "v1"), ("region", "global")].into_iter().collect();
    let json = serde_json::to_string(&attrs).unwrap();
    assert_eq!(json, r#"{"api":"v1","region":"global"}"#);
}
