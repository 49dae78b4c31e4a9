//! Argument pattern matching
//!
//! Patterns are plain JSON values taken from the dataset. Matching rules:
//!
//! | Pattern            | Matches                                              |
//! |--------------------|------------------------------------------------------|
//! | `"*"`              | anything                                             |
//! | `[p0, p1, ...]`    | a sequence of the same length, element-wise          |
//! | `{k: p, ...}`      | a mapping holding every `k`; extra keys are ignored  |
//! | anything else      | an equal value of the same type (`1` is not `1.0`)   |

use serde_json::Value;

/// Pattern marker that matches any actual argument
pub const WILDCARD: &str = "*";

/// Check whether `actual` satisfies `pattern`.
///
/// ```
/// use serde_json::json;
/// use smock::matches;
///
/// assert!(matches(&json!("A"), &json!("A")));
/// assert!(!matches(&json!("A"), &json!("B")));
/// assert!(matches(&json!(["A", "B", "C"]), &json!(["A", "B", "C"])));
/// assert!(matches(&json!(["A", "B", "C"]), &json!("*")));
/// ```
pub fn matches(actual: &Value, pattern: &Value) -> bool {
    if is_wildcard(pattern) {
        return true;
    }
    match (actual, pattern) {
        (Value::Array(actual), Value::Array(pattern)) => {
            actual.len() == pattern.len()
                && actual.iter().zip(pattern).all(|(a, p)| matches(a, p))
        }
        (Value::Object(actual), Value::Object(pattern)) => pattern
            .iter()
            .all(|(key, p)| actual.get(key).is_some_and(|a| matches(a, p))),
        // serde_json keeps integers and floats apart, so `1` never equals `1.0`
        _ => actual == pattern,
    }
}

pub fn is_wildcard(pattern: &Value) -> bool {
    pattern.as_str() == Some(WILDCARD)
}
