//! Risk tier classification and response-level risk summary.

use crate::config::RiskConfig;
use crate::metrics::{RiskLevel, TokenMetric};

/// Tier for one token.
///
/// An upstream tier is authoritative. Without one, the tier is derived from
/// the normalised entropy using the configured cut-offs; with neither, the
/// token has no tier.
#[must_use]
pub fn classify(metric: &TokenMetric, cfg: &RiskConfig) -> Option<RiskLevel> {
    if let Some(level) = metric.risk_level {
        return Some(level);
    }
    let normalized = metric.normalized_entropy?;
    if !normalized.is_finite() {
        return None;
    }
    Some(if normalized > cfg.tier_high {
        RiskLevel::High
    } else if normalized > cfg.tier_medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    })
}

/// Whether the summary risk score came from upstream or was computed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    Supplied,
    Derived,
}

/// Response-level risk summary shown next to the aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseRisk {
    pub score: f64,
    pub source: ScoreSource,
    pub high_uncertainty: bool,
}

/// `min(epr / risk_scale, 1.0)`.
#[must_use]
pub fn derived_score(epr: f64, cfg: &RiskConfig) -> f64 {
    (epr / cfg.risk_scale).min(1.0)
}

/// `epr` strictly above the configured threshold.
#[must_use]
pub fn is_high_uncertainty(epr: f64, cfg: &RiskConfig) -> bool {
    epr > cfg.high_epr_threshold
}

/// Summarise a response. Returns `None` when there is no `epr` to judge.
#[must_use]
pub fn response_risk(epr: Option<f64>, supplied: Option<f64>, cfg: &RiskConfig) -> Option<ResponseRisk> {
    let epr = epr?;
    let (score, source) = match supplied {
        Some(score) if score.is_finite() => (score, ScoreSource::Supplied),
        _ => (derived_score(epr, cfg), ScoreSource::Derived),
    };
    Some(ResponseRisk {
        score,
        source,
        high_uncertainty: is_high_uncertainty(epr, cfg),
    })
}
