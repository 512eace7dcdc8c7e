//! Config redaction for safe logging and display.

use serde_json::Value;

/// Keys whose values are masked wherever they appear in the config tree.
const SENSITIVE_KEYS: &[&str] = &["signingSecret"];

const MASK: &str = "***redacted***";

/// Serialize a config value tree with all sensitive values masked.
///
/// Used by `check-config` output and anywhere a config is logged; the
/// original value is never modified.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                if SENSITIVE_KEYS.contains(&k.as_str()) && v.is_string() {
                    result.insert(k.clone(), Value::String(MASK.to_string()));
                } else {
                    result.insert(k.clone(), redact(v));
                }
            }
            Value::Object(result)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(redact).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_signing_secret_at_any_depth() {
        let v = json!({
            "gate": {"session": {"cookieName": "folio_session", "signingSecret": "hunter2"}}
        });
        let redacted = redact(&v);
        assert_eq!(redacted["gate"]["session"]["signingSecret"], MASK);
        assert_eq!(redacted["gate"]["session"]["cookieName"], "folio_session");
    }

    #[test]
    fn leaves_non_sensitive_values_alone() {
        let v = json!({"gateway": {"port": 4600}});
        assert_eq!(redact(&v), v);
    }
}
