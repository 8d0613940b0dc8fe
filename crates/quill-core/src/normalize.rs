//! Best-effort pretty-printing of model-produced JSON.

/// Normalize a raw structured-output string for display.
///
/// If the input parses as JSON it is re-serialized with 2-space indentation,
/// keeping the key order the parser saw. Anything else passes through
/// unchanged. Total over all inputs; never fails.
pub fn normalize(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_prints_compact_json() {
        let raw = r#"{"name":"string","email":"string"}"#;
        let normalized = normalize(raw);
        assert_eq!(
            normalized,
            "{\n  \"name\": \"string\",\n  \"email\": \"string\"\n}"
        );
    }

    #[test]
    fn preserves_key_order() {
        let raw = r#"{"zebra":1,"apple":2}"#;
        let normalized = normalize(raw);
        let zebra = normalized.find("zebra").unwrap();
        let apple = normalized.find("apple").unwrap();
        assert!(zebra < apple);
    }

    #[test]
    fn invalid_json_passes_through() {
        let raw = "not json at all {";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn empty_string_passes_through() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn idempotent_on_canonical_output() {
        let once = normalize(r#"{"a":[1,2,{"b":null}],"c":"x"}"#);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn handles_non_object_json() {
        assert_eq!(normalize("[1,2]"), "[\n  1,\n  2\n]");
        assert_eq!(normalize("42"), "42");
        assert_eq!(normalize("\"hi\""), "\"hi\"");
    }
}
