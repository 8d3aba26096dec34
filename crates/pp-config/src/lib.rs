//! Layered YAML configuration for repricing runs.
//!
//! Recognised keys (everything optional; CLI flags override):
//!
//! ```yaml
//! pricing:
//!   price_points: [3, 5, 9]      # or "3,5,9"
//!   prefer_lower_prices: false
//! output:
//!   no_valid_price_marker: "no-valid-price"
//! ```
//!
//! Any other leaf is reported by [`report_unused_keys`].

use anyhow::{bail, Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;

pub const PTR_PRICE_POINTS: &str = "/pricing/price_points";
pub const PTR_PREFER_LOWER_PRICES: &str = "/pricing/prefer_lower_prices";
pub const PTR_NO_VALID_PRICE_MARKER: &str = "/output/no_valid_price_marker";

/// JSON-pointer prefixes the CLI actually reads. Keep in sync with
/// [`RepricingConfig::from_config_json`].
pub const CONSUMED_POINTERS: &[&str] = &[
    PTR_PRICE_POINTS,
    PTR_PREFER_LOWER_PRICES,
    PTR_NO_VALID_PRICE_MARKER,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone)]
pub struct UnusedKeyReport {
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Produce an unused-key report.
/// If `policy == Fail`, returns an error when unused keys exist.
/// If `policy == Warn`, always returns Ok(report).
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = CONSUMED_POINTERS
        .iter()
        .map(|p| normalize_pointer(p))
        .collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|lp| !consumed.iter().any(|cp| is_prefix_pointer(cp, lp)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. First few: {}",
            report.unused_leaf_pointers.len(),
            preview_list(&report.unused_leaf_pointers, 12)
        );
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Typed view
// ---------------------------------------------------------------------------

/// Repricing settings read from the merged config. `None` means "not set
/// here"; the caller falls back to flags or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepricingConfig {
    pub price_points: Option<Vec<i64>>,
    pub prefer_lower_prices: Option<bool>,
    pub no_valid_price_marker: Option<String>,
}

impl RepricingConfig {
    pub fn from_config_json(v: &Value) -> Result<Self> {
        let price_points = match v.pointer(PTR_PRICE_POINTS) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(
                parse_price_points(s)
                    .with_context(|| format!("invalid {PTR_PRICE_POINTS}"))?,
            ),
            Some(Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let n = item.as_i64().with_context(|| {
                        format!("{PTR_PRICE_POINTS}/{i} must be an integer, got {item}")
                    })?;
                    out.push(n);
                }
                Some(out)
            }
            Some(Value::Number(n)) => {
                let n = n
                    .as_i64()
                    .with_context(|| format!("{PTR_PRICE_POINTS} must be an integer, got {n}"))?;
                Some(vec![n])
            }
            Some(other) => bail!(
                "{PTR_PRICE_POINTS} must be a list or comma separated string, got {other}"
            ),
        };

        let prefer_lower_prices = match v.pointer(PTR_PREFER_LOWER_PRICES) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => bail!("{PTR_PREFER_LOWER_PRICES} must be a bool, got {other}"),
        };

        let no_valid_price_marker = match v.pointer(PTR_NO_VALID_PRICE_MARKER) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => bail!("{PTR_NO_VALID_PRICE_MARKER} must be a string, got {other}"),
        };

        Ok(Self {
            price_points,
            prefer_lower_prices,
            no_valid_price_marker,
        })
    }
}

/// Parse a comma separated price-point list such as `"3,5,9"`.
///
/// Tokens are trimmed. A blank list parses to an empty vec (range checks
/// belong to the resolver); a blank or non-integer token is an error.
pub fn parse_price_points(raw: &str) -> Result<Vec<i64>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(|tok| {
            let tok = tok.trim();
            tok.parse::<i64>()
                .with_context(|| format!("failed to parse price point '{tok}'"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    pub fn repricing(&self) -> Result<RepricingConfig> {
        RepricingConfig::from_config_json(&self.config_json)
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

/// Merge YAML docs in order: earlier docs are base, later docs override.
/// Empty documents are skipped.
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        if v_json.is_null() {
            continue;
        }
        if !v_json.is_object() {
            bail!("config document must be a mapping at the top level");
        }
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json::Map is BTreeMap-backed here (no preserve_order), so keys
    // serialize sorted regardless of YAML key order.
    let s = serde_json::to_string(v).context("canonical json serialize failed")?;
    Ok(s)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Normalize JSON pointer:
/// - must begin with "/"
/// - no trailing "/" unless it's just "/"
fn normalize_pointer(p: &str) -> String {
    let mut s = p.trim().to_string();
    if s.is_empty() {
        return "/".to_string();
    }
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    while s.ends_with('/') && s.len() > 1 {
        s.pop();
    }
    s
}

/// Return true if `prefix` is a JSON-pointer prefix of `leaf`.
///
/// "/a/b" consumes "/a/b/c" but NOT "/a/bc".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map.iter() {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        _ => {
            let p = if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            };
            out.push(p);
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

fn preview_list(items: &[String], n: usize) -> String {
    let take = items.iter().take(n).cloned().collect::<Vec<_>>();
    format!("{:?}", take)
}
