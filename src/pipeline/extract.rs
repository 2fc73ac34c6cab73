//! Response-body extraction.
//!
//! Upstream endpoints disagree wildly about reply shape: some return clean
//! JSON with a well-known answer field, some bury the text under an ad-hoc
//! key, and some return half-serialized text with the answer embedded in
//! noise. Extraction runs a fixed chain of strategies over the raw body and
//! takes the first one that yields text. Every strategy is a pure function
//! `&str -> Option<String>`; `None` is the uniform failure signal and nothing
//! in this module panics on malformed input.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// JSON keys probed in order when the body parses as an object.
const ANSWER_KEYS: [&str; 6] = ["result", "response", "answer", "text", "content", "message"];

/// Minimum length for a regex capture to count as an answer.
const CAPTURE_FLOOR: usize = 5;

/// Minimum length for the cleanup fallback to count as an answer.
const CLEANUP_FLOOR: usize = 15;

/// Serialized-answer shapes, tightest first. The loose trailing variants pick
/// up bodies where the key survived but the JSON syntax did not.
static ANSWER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#""result"\s*:\s*"([^"]+)""#,
        r#""response"\s*:\s*"([^"]+)""#,
        r#""answer"\s*:\s*"([^"]+)""#,
        r#""text"\s*:\s*"([^"]+)""#,
        r#"result[^"]*"([^"]+)""#,
        r#"response[^"]*"([^"]+)""#,
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){pattern}")).expect("answer pattern is valid"))
    .collect()
});

/// A leading JSON-looking object, e.g. a status envelope before the text.
static LEADING_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{.*?\}").expect("leading object pattern is valid"));

/// Inline `"key":` fragments left behind by broken serialization.
static KEY_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\w+"\s*:"#).expect("key fragment pattern is valid"));

/// Technical tokens that leak from upstream plumbing: request ids and token
/// count annotations.
static TECHNICAL_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"chatcmpl-\w+|fp_\w+|tokens?:\s*\d+").expect("token pattern is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Turn a raw response body into an answer text, or signal that the body
/// carries nothing usable. The result is always trimmed and non-empty.
pub fn extract(raw_body: &str) -> Option<String> {
    let body = raw_body.trim();
    if body.is_empty() {
        return None;
    }

    const STRATEGIES: [fn(&str) -> Option<String>; 3] = [json_probe, regex_probe, cleanup_fallback];
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(body))
        .filter(|text| !text.is_empty())
}

/// Strategy 1: parse as JSON and probe for the answer field.
fn json_probe(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match &value {
        Value::Object(map) => {
            for key in ANSWER_KEYS {
                if let Some(field) = map.get(key) {
                    let text = stringify(field);
                    let text = text.trim();
                    if !text.is_empty() && !text.eq_ignore_ascii_case("null") {
                        return Some(text.to_string());
                    }
                }
            }
            // No known key: take the first string value in declaration order
            for field in map.values() {
                if let Value::String(s) = field {
                    let s = s.trim();
                    if !s.is_empty() {
                        return Some(s.to_string());
                    }
                }
            }
            Some(value.to_string())
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        _ => None,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strategy 2: fish a serialized answer field out of a non-JSON body.
fn regex_probe(body: &str) -> Option<String> {
    for pattern in ANSWER_PATTERNS.iter() {
        if let Some(capture) = pattern.captures(body).and_then(|caps| caps.get(1)) {
            let text = capture.as_str().trim();
            if text.len() > CAPTURE_FLOOR {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Strategy 3: strip structural noise and keep whatever prose remains.
fn cleanup_fallback(body: &str) -> Option<String> {
    let text = LEADING_OBJECT.replace(body, "");
    let text = KEY_FRAGMENT.replace_all(&text, "");
    let text = TECHNICAL_TOKENS.replace_all(&text, "");
    let text: String = text
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '[' | ']' | '"'))
        .collect();
    let text = WHITESPACE_RUN.replace_all(&text, " ").trim().to_string();

    if text.len() > CLEANUP_FLOOR {
        Some(text)
    } else {
        None
    }
}
