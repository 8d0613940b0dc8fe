use serde::{Deserialize, Serialize};

/// Result of the Structure operation.
///
/// `structured_json` SHOULD be valid JSON but is not validated here; the
/// normalizer handles unparseable output. Field names match the model's
/// declared output shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructureOutcome {
    #[serde(rename = "jsonOutput")]
    pub structured_json: String,
    #[serde(rename = "biasDetected")]
    pub bias_detected: bool,
    #[serde(rename = "biasReport", default, skip_serializing_if = "Option::is_none")]
    pub bias_report: Option<String>,
}

/// Result of the Title operation: a 3-6 word list label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleOutcome {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_outcome_parses_model_output() {
        let raw = r#"{"jsonOutput":"{\"name\":\"string\"}","biasDetected":false}"#;
        let outcome: StructureOutcome = serde_json::from_str(raw).unwrap();
        assert_eq!(outcome.structured_json, "{\"name\":\"string\"}");
        assert!(!outcome.bias_detected);
        assert!(outcome.bias_report.is_none());
    }

    #[test]
    fn structure_outcome_accepts_null_bias_report() {
        let raw = r#"{"jsonOutput":"{}","biasDetected":true,"biasReport":null}"#;
        let outcome: StructureOutcome = serde_json::from_str(raw).unwrap();
        assert!(outcome.bias_detected);
        assert!(outcome.bias_report.is_none());
    }
}
