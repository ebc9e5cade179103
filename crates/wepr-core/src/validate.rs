//! Best-effort data contract checks for upstream response payloads.
//!
//! Nothing here rejects a payload. Every finding becomes an annotation on the
//! ingested set so the panel can show it next to whatever was renderable.

use thiserror::Error;

use crate::payload::ResponsePayload;

/// One data contract problem found in an upstream payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("token {index}: entropy {value} is negative or not finite")]
    NegativeEntropy { index: usize, value: f64 },

    #[error("token {index}: candidate {candidate:?} has probability {value} outside [0, 1]")]
    ProbabilityOutOfRange {
        index: usize,
        candidate: String,
        value: f64,
    },

    #[error("token {index}: normalized entropy {value} outside [0, 1]")]
    NormalizedEntropyOutOfRange { index: usize, value: f64 },

    #[error("response has no tokens but reports epr {epr}")]
    EmptyTokensWithEpr { epr: f64 },

    #[error("token text covers {rendered_len} chars but response text has {expected_len}")]
    TokenTextMismatch {
        expected_len: usize,
        rendered_len: usize,
    },
}

impl ContractViolation {
    /// Token position the violation points at, when it concerns one token.
    #[must_use]
    pub fn token_index(&self) -> Option<usize> {
        match self {
            Self::NegativeEntropy { index, .. }
            | Self::ProbabilityOutOfRange { index, .. }
            | Self::NormalizedEntropyOutOfRange { index, .. } => Some(*index),
            Self::EmptyTokensWithEpr { .. } | Self::TokenTextMismatch { .. } => None,
        }
    }
}

/// Check a decoded payload against the data contract, in token order.
#[must_use]
pub fn validate_payload(payload: &ResponsePayload) -> Vec<ContractViolation> {
    let mut violations = Vec::new();

    for (index, metric) in payload.tokens.iter().enumerate() {
        if !metric.entropy.is_finite() || metric.entropy < 0.0 {
            violations.push(ContractViolation::NegativeEntropy {
                index,
                value: metric.entropy,
            });
        }
        if let Some(value) = metric.normalized_entropy {
            if !(0.0..=1.0).contains(&value) {
                violations.push(ContractViolation::NormalizedEntropyOutOfRange { index, value });
            }
        }
        for candidate in &metric.candidates {
            if !(0.0..=1.0).contains(&candidate.prob) {
                violations.push(ContractViolation::ProbabilityOutOfRange {
                    index,
                    candidate: candidate.token.clone(),
                    value: candidate.prob,
                });
            }
        }
    }

    if payload.tokens.is_empty() {
        if let Some(epr) = payload.epr {
            violations.push(ContractViolation::EmptyTokensWithEpr { epr });
        }
    } else if !payload.response.is_empty() {
        let rendered: String = payload.tokens.iter().map(|t| t.token.as_str()).collect();
        if rendered.trim() != payload.response.trim() {
            violations.push(ContractViolation::TokenTextMismatch {
                expected_len: payload.response.trim().chars().count(),
                rendered_len: rendered.trim().chars().count(),
            });
        }
    }

    violations
}
