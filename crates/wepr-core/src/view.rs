//! Render-agnostic projection read by every inspection surface.
//!
//! [`project`] is the only way to obtain an [`InspectionView`]. The text
//! highlighter, the entropy trend, the candidate distribution and the summary
//! panel all draw from the same snapshot, so they can never disagree about
//! which token is selected or what the aggregate is.

use crate::aggregate::running_aggregate_or_epr;
use crate::classifier::{classify, response_risk, ResponseRisk};
use crate::config::RiskConfig;
use crate::cursor::CursorState;
use crate::metrics::{RiskLevel, TokenMetric, TokenMetricSet};
use crate::validate::ContractViolation;

/// One point on the entropy-over-position trend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub position: usize,
    pub entropy: f64,
    pub token: String,
}

/// The selected token together with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedToken {
    pub index: usize,
    pub metric: TokenMetric,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InspectionView {
    /// `None` means "render a placeholder", never zero.
    pub running_aggregate_entropy: Option<f64>,
    pub selected_token: Option<SelectedToken>,
    pub highlight_per_token: Vec<Option<RiskLevel>>,
    pub chart_series: Vec<ChartPoint>,
    pub cursor: CursorState,
    pub token_count: usize,
    pub final_epr: Option<f64>,
    pub risk: Option<ResponseRisk>,
    pub response_text: String,
    pub annotations: Vec<ContractViolation>,
}

impl InspectionView {
    /// No data to inspect: surfaces show their placeholder state.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.token_count == 0 && self.final_epr.is_none()
    }

    /// Token text paired with its tier, in generation order.
    pub fn highlighted_tokens(&self) -> impl Iterator<Item = (&str, Option<RiskLevel>)> + '_ {
        self.chart_series
            .iter()
            .zip(self.highlight_per_token.iter())
            .map(|(point, tier)| (point.token.as_str(), *tier))
    }

    /// Summary panel title, e.g. `Running EPR (Token 2/3)`.
    #[must_use]
    pub fn aggregate_label(&self) -> String {
        match &self.selected_token {
            Some(selected) => format!(
                "Running EPR (Token {}/{})",
                selected.index + 1,
                self.token_count
            ),
            None => "Total EPR".to_owned(),
        }
    }
}

/// Project `(set, cursor)` into a view. Total over every input.
#[must_use]
pub fn project(set: Option<&TokenMetricSet>, cursor: CursorState, cfg: &RiskConfig) -> InspectionView {
    let Some(set) = set else {
        return InspectionView::default();
    };
    if set.is_placeholder() {
        return InspectionView {
            annotations: set.annotations().to_vec(),
            ..InspectionView::default()
        };
    }

    let selected_token = cursor.index().and_then(|index| {
        set.token(index).map(|metric| SelectedToken {
            index,
            metric: metric.clone(),
        })
    });
    let effective_cursor = match &selected_token {
        Some(selected) => CursorState::At(selected.index),
        None => CursorState::None,
    };

    let running_aggregate_entropy = if set.is_empty() {
        set.epr()
    } else {
        running_aggregate_or_epr(Some(set), effective_cursor)
    };

    InspectionView {
        running_aggregate_entropy,
        selected_token,
        highlight_per_token: set.tokens().iter().map(|metric| classify(metric, cfg)).collect(),
        chart_series: set
            .tokens()
            .iter()
            .enumerate()
            .map(|(position, metric)| ChartPoint {
                position,
                entropy: metric.entropy,
                token: metric.token.clone(),
            })
            .collect(),
        cursor: effective_cursor,
        token_count: set.len(),
        final_epr: set.epr(),
        risk: response_risk(set.epr(), set.risk_score(), cfg),
        response_text: set.response_text().to_owned(),
        annotations: set.annotations().to_vec(),
    }
}
