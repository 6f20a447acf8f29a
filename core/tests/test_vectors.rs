//! Verify URL parsing/building and header-block parsing against the JSON
//! test vectors stored in `test-vectors/`.
//!
//! Each URL case gives an input string, whether it should parse, and the
//! expected components and derived views. Comparing through
//! `serde_json::Value` keeps `null` and absent handling uniform.

use courier_core::{parse_header_block, Url};
use serde_json::{json, Value};

fn opt_str(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| json!(s))
}

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();

        let parsed = Url::parse(input);
        if !case["parses"].as_bool().unwrap() {
            assert!(parsed.is_none(), "{name}: expected parse failure");
            continue;
        }
        let url = parsed.unwrap_or_else(|| panic!("{name}: failed to parse {input:?}"));
        let expected = &case["expected"];
        let c = url.components();

        assert_eq!(url.build(), expected["build"].as_str().unwrap(), "{name}: build");
        assert_eq!(opt_str(c.scheme.as_deref()), expected["scheme"], "{name}: scheme");
        assert_eq!(opt_str(c.user.as_deref()), expected["user"], "{name}: user");
        assert_eq!(opt_str(c.pass.as_deref()), expected["pass"], "{name}: pass");
        assert_eq!(opt_str(c.host.as_deref()), expected["host"], "{name}: host");
        assert_eq!(c.port.map_or(Value::Null, |p| json!(p)), expected["port"], "{name}: port");
        assert_eq!(url.path(), expected["path"].as_str().unwrap(), "{name}: path");
        assert_eq!(json!(url.path_segments()), expected["segments"], "{name}: segments");
        assert_eq!(
            url.query_string(),
            expected["query_string"].as_str().unwrap(),
            "{name}: query string"
        );
        assert_eq!(opt_str(url.anchor()), expected["anchor"], "{name}: anchor");
        assert_eq!(json!(url.is_secure()), expected["secure"], "{name}: secure");
        assert_eq!(
            json!(url.has_credentials()),
            expected["has_credentials"],
            "{name}: has_credentials"
        );
    }
}

#[test]
fn failed_set_url_preserves_state() {
    let raw = include_str!("../../test-vectors/urls.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let original = "https://keep.test/a/b?k=v#top";
    for case in vectors["cases"].as_array().unwrap() {
        if case["parses"].as_bool().unwrap() {
            continue;
        }
        let name = case["name"].as_str().unwrap();
        let mut url = Url::from(original);
        assert!(!url.set_url(case["input"].as_str().unwrap()), "{name}");
        assert_eq!(url.build(), original, "{name}: state changed");
    }
}

// ---------------------------------------------------------------------------
// Header blocks
// ---------------------------------------------------------------------------

#[test]
fn header_test_vectors() {
    let raw = include_str!("../../test-vectors/headers.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let headers = parse_header_block(case["raw"].as_str().unwrap());

        let actual: Vec<Value> = headers.iter().map(|(k, v)| json!([k, v])).collect();
        assert_eq!(Value::Array(actual), case["expected"], "{name}");
    }
}
