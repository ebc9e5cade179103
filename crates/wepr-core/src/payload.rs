//! Decoding of upstream `onNewResponse` payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{WeprError, WeprResult};
use crate::metrics::{TokenMetric, TokenMetricSet};
use crate::validate::validate_payload;

/// One completed assistant response with its token metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    #[serde(default, alias = "response_text", alias = "responseText")]
    pub response: String,
    #[serde(default)]
    pub epr: Option<f64>,
    #[serde(default, alias = "riskScore")]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub tokens: Vec<TokenMetric>,
}

impl ResponsePayload {
    /// Decode a single JSON object.
    pub fn from_json(raw: &str) -> WeprResult<Self> {
        serde_json::from_str(raw).map_err(|err| WeprError::Payload(format!("decode response: {err}")))
    }

    /// Build the immutable metric set, attaching any contract violations.
    #[must_use]
    pub fn into_metric_set(self) -> TokenMetricSet {
        let annotations = validate_payload(&self);
        let text = if self.response.is_empty() {
            self.tokens.iter().map(|t| t.token.as_str()).collect::<String>()
        } else {
            self.response.clone()
        };
        TokenMetricSet::new(self.tokens, self.epr, self.risk_score)
            .with_response_text(&text)
            .with_annotations(annotations)
    }
}

/// Decode a batch of responses in arrival order.
///
/// Accepts a single object, a JSON array of objects, or JSON Lines.
pub fn parse_batch(raw: &str) -> WeprResult<Vec<ResponsePayload>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| {
                    serde_json::from_value(item).map_err(|err| {
                        WeprError::Payload(format!("decode response #{idx}: {err}"))
                    })
                })
                .collect(),
            Value::Object(_) => serde_json::from_value(value)
                .map(|payload| vec![payload])
                .map_err(|err| WeprError::Payload(format!("decode response: {err}"))),
            other => Err(WeprError::Payload(format!(
                "expected a response object or array, got {}",
                json_kind(&other)
            ))),
        };
    }

    let mut out = Vec::new();
    for (line_no, line) in trimmed.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let payload = serde_json::from_str(line)
            .map_err(|err| WeprError::Payload(format!("line {}: {err}", line_no + 1)))?;
        out.push(payload);
    }
    Ok(out)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::metrics::RiskLevel;
    use crate::validate::ContractViolation;

    const SAMPLE: &str = r#"{
        "response": "The sky",
        "epr": 0.83,
        "risk_score": 0.33,
        "tokens": [
            {"token": "The", "entropy": 0.2, "normalized_entropy": 0.07, "risk_level": "low",
             "candidates": [{"token": "The", "prob": 0.95}, {"token": "A", "prob": 0.03}]},
            {"token": " sky", "entropy": 1.8, "normalized_entropy": 0.61, "risk_level": "high",
             "candidates": [{"token": " sky", "prob": 0.4}, {"token": " sea", "prob": 0.35}]}
        ]
    }"#;

    #[test]
    fn decodes_upstream_body() {
        let payload = ResponsePayload::from_json(SAMPLE).expect("decode");
        assert_eq!(payload.response, "The sky");
        assert_eq!(payload.epr, Some(0.83));
        assert_eq!(payload.risk_score, Some(0.33));
        assert_eq!(payload.tokens.len(), 2);
        assert_eq!(payload.tokens[1].risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn null_aggregates_and_missing_tokens_decode() {
        let payload =
            ResponsePayload::from_json(r#"{"response": "", "epr": null, "riskScore": null}"#)
                .expect("decode");
        assert!(payload.tokens.is_empty());
        assert_eq!(payload.epr, None);
        assert!(payload.into_metric_set().is_placeholder());
    }

    #[test]
    fn malformed_body_is_payload_error() {
        let err = ResponsePayload::from_json(r#"{"tokens": 3}"#).expect_err("bad tokens");
        assert!(matches!(err, WeprError::Payload(_)));
    }

    #[test]
    fn metric_set_carries_annotations() {
        let payload = ResponsePayload::from_json(
            r#"{"response": "x", "epr": 0.1, "tokens": [{"token": "x", "entropy": -1.0}]}"#,
        )
        .expect("decode");
        let set = payload.into_metric_set();
        assert_eq!(
            set.annotations(),
            &[ContractViolation::NegativeEntropy {
                index: 0,
                value: -1.0
            }]
        );
    }

    #[test]
    fn batch_accepts_object_array_and_lines() {
        assert_eq!(parse_batch(SAMPLE).expect("object").len(), 1);

        let array = format!("[{SAMPLE}, {SAMPLE}]");
        assert_eq!(parse_batch(&array).expect("array").len(), 2);

        let lines = r#"{"response": "a", "epr": 0.1, "tokens": []}
{"response": "b", "epr": 0.2, "tokens": []}
"#;
        let batch = parse_batch(lines).expect("lines");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].response, "b");
    }

    #[test]
    fn batch_reports_bad_line_number() {
        let lines = "{\"response\": \"a\"}\nnot json\n";
        let err = parse_batch(lines).expect_err("bad line");
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn batch_rejects_scalar_document() {
        let err = parse_batch("42").expect_err("scalar");
        assert!(err.to_string().contains("a number"), "{err}");
    }
}
