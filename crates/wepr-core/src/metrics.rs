//! Per-response token metric data.
//!
//! A [`TokenMetricSet`] is built once per assistant response and never edited
//! afterwards; the session swaps in a new one when the next response lands.

use serde::{Deserialize, Deserializer, Serialize};

use crate::validate::ContractViolation;

/// Discrete uncertainty tier of one generated token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Parse an upstream tier label. Unknown labels yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Lenient decoder for optional `risk_level` fields: unknown strings and
/// `null` both decode as absent.
pub(crate) fn deserialize_risk_level<'de, D>(deserializer: D) -> Result<Option<RiskLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(RiskLevel::parse))
}

/// One alternative token considered at a generation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub token: String,
    #[serde(alias = "probability")]
    pub prob: f64,
}

impl Candidate {
    #[must_use]
    pub fn new(token: &str, prob: f64) -> Self {
        Self {
            token: token.to_owned(),
            prob,
        }
    }
}

/// Uncertainty metrics for a single generated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetric {
    pub token: String,
    pub entropy: f64,
    #[serde(default, alias = "normalizedEntropy")]
    pub normalized_entropy: Option<f64>,
    #[serde(
        default,
        alias = "riskLevel",
        deserialize_with = "deserialize_risk_level"
    )]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl TokenMetric {
    #[must_use]
    pub fn new(token: &str, entropy: f64) -> Self {
        Self {
            token: token.to_owned(),
            entropy,
            normalized_entropy: None,
            risk_level: None,
            candidates: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_normalized(mut self, normalized: f64) -> Self {
        self.normalized_entropy = Some(normalized);
        self
    }

    #[must_use]
    pub fn with_risk(mut self, level: RiskLevel) -> Self {
        self.risk_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Probability the upstream assigned to the token that was actually
    /// generated, if it appears among the candidates.
    #[must_use]
    pub fn chosen_probability(&self) -> Option<f64> {
        self.candidates
            .iter()
            .find(|candidate| candidate.token == self.token)
            .map(|candidate| candidate.prob)
    }
}

/// Immutable metrics for one complete assistant response.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMetricSet {
    response_text: String,
    tokens: Vec<TokenMetric>,
    epr: Option<f64>,
    risk_score: Option<f64>,
    annotations: Vec<ContractViolation>,
}

impl TokenMetricSet {
    #[must_use]
    pub fn new(tokens: Vec<TokenMetric>, epr: Option<f64>, risk_score: Option<f64>) -> Self {
        let response_text = tokens.iter().map(|t| t.token.as_str()).collect();
        Self {
            response_text,
            tokens,
            epr,
            risk_score,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_response_text(mut self, text: &str) -> Self {
        self.response_text = text.to_owned();
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<ContractViolation>) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn tokens(&self) -> &[TokenMetric] {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, index: usize) -> Option<&TokenMetric> {
        self.tokens.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Response-level entropy-per-response aggregate as supplied upstream.
    #[must_use]
    pub fn epr(&self) -> Option<f64> {
        self.epr
    }

    /// Summary risk score as supplied upstream, if any.
    #[must_use]
    pub fn risk_score(&self) -> Option<f64> {
        self.risk_score
    }

    #[must_use]
    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    /// Contract violations found when the set was ingested.
    #[must_use]
    pub fn annotations(&self) -> &[ContractViolation] {
        &self.annotations
    }

    /// A set with no tokens and no `epr` carries nothing to inspect.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.tokens.is_empty() && self.epr.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parse_is_case_insensitive() {
        assert_eq!(RiskLevel::parse("HIGH"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::parse(" medium "), Some(RiskLevel::Medium));
        assert_eq!(RiskLevel::parse("low"), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::parse("severe"), None);
    }

    #[test]
    fn token_metric_decodes_upstream_shape() {
        let raw = r#"{
            "token": "Paris",
            "entropy": 0.42,
            "normalized_entropy": 0.14,
            "risk_level": "low",
            "candidates": [{"token": "Paris", "prob": 0.91}, {"token": "Lyon", "prob": 0.05}]
        }"#;
        let metric: TokenMetric = serde_json::from_str(raw).expect("decode metric");
        assert_eq!(metric.token, "Paris");
        assert_eq!(metric.normalized_entropy, Some(0.14));
        assert_eq!(metric.risk_level, Some(RiskLevel::Low));
        assert_eq!(metric.candidates.len(), 2);
        assert_eq!(metric.chosen_probability(), Some(0.91));
    }

    #[test]
    fn unknown_risk_label_decodes_as_absent() {
        let raw = r#"{"token": "x", "entropy": 1.0, "riskLevel": "??"}"#;
        let metric: TokenMetric = serde_json::from_str(raw).expect("decode metric");
        assert_eq!(metric.risk_level, None);
        assert!(metric.candidates.is_empty());
    }

    #[test]
    fn set_derives_response_text_from_tokens() {
        let set = TokenMetricSet::new(
            vec![TokenMetric::new("Hello", 0.1), TokenMetric::new(" world", 0.3)],
            Some(0.2),
            None,
        );
        assert_eq!(set.response_text(), "Hello world");
        assert_eq!(set.len(), 2);
        assert!(!set.is_placeholder());
    }

    #[test]
    fn empty_set_without_epr_is_placeholder() {
        let set = TokenMetricSet::new(Vec::new(), None, None);
        assert!(set.is_placeholder());
        assert!(set.is_empty());
    }
}
