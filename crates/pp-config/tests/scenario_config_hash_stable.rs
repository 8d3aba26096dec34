//! Config hash stability
//!
//! GREEN when:
//! - `load_layered_yaml_from_strings` called twice on the same inputs returns
//!   identical config_hash.
//! - Reordering keys within YAML doesn't change the hash (canonicalization).
//! - Different values produce different hashes.
//! - Overlay layers override the base and hash stably.

use pp_config::load_layered_yaml_from_strings;

const BASE_YAML: &str = r#"
pricing:
  price_points: [3, 5, 9]
  prefer_lower_prices: false
output:
  no_valid_price_marker: "no-valid-price"
"#;

/// Same content as BASE_YAML but with keys in different order.
const BASE_YAML_REORDERED: &str = r#"
output:
  no_valid_price_marker: "no-valid-price"
pricing:
  prefer_lower_prices: false
  price_points: [3, 5, 9]
"#;

const OVERLAY_YAML: &str = r#"
pricing:
  prefer_lower_prices: true
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        original.config_hash, reordered.config_hash,
        "reordering keys in YAML must not change the hash"
    );
    assert_eq!(original.canonical_json, reordered.canonical_json);
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&["pricing:\n  price_points: [0, 5]\n"]).unwrap();

    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn merged_layers_produce_stable_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);

    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_ne!(a.config_hash, base.config_hash);

    let prefer_lower = a
        .config_json
        .pointer("/pricing/prefer_lower_prices")
        .and_then(|v| v.as_bool())
        .unwrap();
    assert!(prefer_lower, "overlay should override base preference");

    let points = a.config_json.pointer("/pricing/price_points").unwrap();
    assert_eq!(points, &serde_json::json!([3, 5, 9]), "siblings survive the merge");
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn empty_documents_hash_like_empty_mapping() {
    let a = load_layered_yaml_from_strings(&["{}"]).unwrap();
    let b = load_layered_yaml_from_strings(&[""]).unwrap();
    let c = load_layered_yaml_from_strings(&[]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.config_hash, c.config_hash);
    assert_eq!(a.canonical_json, "{}");
}

#[test]
fn non_mapping_document_is_rejected() {
    assert!(load_layered_yaml_from_strings(&["- 3\n- 5\n"]).is_err());
    assert!(load_layered_yaml_from_strings(&["pricing: [unclosed"]).is_err());
}
