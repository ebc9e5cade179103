//! Metrics summary: running aggregate, uncertainty badge, risk gauge, final EPR.

use wepr_core::InspectionView;
use wepr_ftui_adapter::render::{Rect, RenderFrame, TextRole};
use wepr_ftui_adapter::style::StyleToken;
use wepr_ftui_adapter::widgets::WidgetSpec;

pub const PLACEHOLDER: &str = "Start a conversation to see hallucination metrics.";

/// One row of the summary panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub text: String,
    pub role: TextRole,
    /// Risk gauge drawn on the row below: `(score, high_uncertainty)`.
    pub gauge: Option<(f64, bool)>,
}

impl SummaryLine {
    fn text(text: impl Into<String>, role: TextRole) -> Self {
        Self {
            text: text.into(),
            role,
            gauge: None,
        }
    }
}

#[must_use]
pub fn summary_lines(view: &InspectionView) -> Vec<SummaryLine> {
    if view.is_placeholder() {
        return vec![SummaryLine::text(PLACEHOLDER, TextRole::Muted)];
    }

    let mut lines = Vec::new();
    let value = view
        .running_aggregate_entropy
        .map_or_else(|| "N/A".to_owned(), |v| format!("{v:.4}"));
    lines.push(SummaryLine::text(value, TextRole::Accent));

    match &view.risk {
        Some(risk) => {
            let (badge, role) = if risk.high_uncertainty {
                ("High Uncertainty", TextRole::Danger)
            } else {
                ("Low Uncertainty", TextRole::Success)
            };
            lines.push(SummaryLine::text(badge, role));
            lines.push(SummaryLine {
                gauge: Some((risk.score, risk.high_uncertainty)),
                ..SummaryLine::text(format!("Risk: {:.2} / 1.0", risk.score), TextRole::Primary)
            });
        }
        None => lines.push(SummaryLine::text("Risk: N/A", TextRole::Muted)),
    }

    if let Some(epr) = view.final_epr {
        lines.push(SummaryLine::text(format!("Final EPR: {epr:.4}"), TextRole::Muted));
    }
    for violation in &view.annotations {
        lines.push(SummaryLine::text(format!("! {violation}"), TextRole::Warning));
    }
    lines
}

/// Draw the summary panel into `rect`.
pub fn render(frame: &mut RenderFrame, rect: Rect, view: &InspectionView) {
    let spec = WidgetSpec::summary_panel();
    let title = view.aggregate_label();
    let inner = frame.draw_panel(rect, &title, spec.border, TextRole::Muted);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut row = 0;
    for line in summary_lines(view) {
        if row >= inner.height {
            break;
        }
        frame.draw_text_in_rect(inner, 1, row, &line.text, line.role);
        row += 1;
        let Some((score, high)) = line.gauge else {
            continue;
        };
        if row < inner.height {
            let color = if high {
                frame.token_color(StyleToken::Danger)
            } else {
                frame.token_color(StyleToken::Success)
            };
            let width = inner.width.saturating_sub(2);
            frame.draw_gauge(inner.x + 1, inner.y + row, width, score, color);
            row += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{render, summary_lines, PLACEHOLDER};
    use wepr_core::{project, RiskConfig, TokenMetric, TokenMetricSet};
    use wepr_core::{CursorState, InspectionView, RiskLevel};
    use wepr_core::validate::ContractViolation;
    use wepr_ftui_adapter::render::{FrameSize, Rect, RenderFrame, TextRole};
    use wepr_ftui_adapter::snapshot::assert_render_frame_snapshot;
    use wepr_ftui_adapter::style::ThemeSpec;

    fn set() -> TokenMetricSet {
        TokenMetricSet::new(
            vec![
                TokenMetric::new("The", 0.2).with_risk(RiskLevel::Low),
                TokenMetric::new(" sky", 1.8).with_risk(RiskLevel::High),
                TokenMetric::new(" is", 0.5).with_risk(RiskLevel::Medium),
            ],
            Some(0.83),
            Some(0.33),
        )
    }

    fn draw(view: &InspectionView) -> RenderFrame {
        let mut frame = RenderFrame::new(
            FrameSize {
                width: 30,
                height: 7,
            },
            ThemeSpec::default(),
        );
        render(
            &mut frame,
            Rect {
                x: 0,
                y: 0,
                width: 30,
                height: 7,
            },
            view,
        );
        frame
    }

    #[test]
    fn placeholder_when_no_set() {
        let lines = summary_lines(&InspectionView::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, PLACEHOLDER);
    }

    #[test]
    fn whole_response_snapshot() {
        let view = project(Some(&set()), CursorState::None, &RiskConfig::default());
        assert_render_frame_snapshot(
            "summary-none",
            &draw(&view),
            "╭─ Total EPR ────────────────╮
│ 0.8300                     │
│ Low Uncertainty            │
│ Risk: 0.33 / 1.0           │
│ ████████▌░░░░░░░░░░░░░░░░░ │
│ Final EPR: 0.8300          │
╰────────────────────────────╯",
        );
    }

    #[test]
    fn running_label_tracks_cursor() {
        let view = project(Some(&set()), CursorState::At(1), &RiskConfig::default());
        let frame = draw(&view);
        assert!(frame.row_text(0).contains("Running EPR (Token 2/3)"));
        assert!(frame.row_text(1).contains("1.0000"));
    }

    #[test]
    fn high_uncertainty_badge() {
        let high = TokenMetricSet::new(vec![TokenMetric::new("x", 1.6)], Some(1.6), None);
        let view = project(Some(&high), CursorState::None, &RiskConfig::default());
        let lines = summary_lines(&view);
        assert_eq!(lines[1].text, "High Uncertainty");
        assert_eq!(lines[2].text, "Risk: 0.64 / 1.0");
        assert_eq!(lines[2].gauge.map(|(_, high)| high), Some(true));
    }

    #[test]
    fn contract_annotations_follow_the_summary() {
        let annotated = set().with_annotations(vec![ContractViolation::NegativeEntropy {
            index: 1,
            value: -0.5,
        }]);
        let view = project(Some(&annotated), CursorState::None, &RiskConfig::default());
        let lines = summary_lines(&view);
        let last = lines.last().expect("annotation line");
        assert_eq!(last.text, "! token 1: entropy -0.5 is negative or not finite");
        assert_eq!(last.role, TextRole::Warning);

        let mut frame = RenderFrame::new(
            FrameSize {
                width: 30,
                height: 8,
            },
            ThemeSpec::default(),
        );
        render(
            &mut frame,
            Rect {
                x: 0,
                y: 0,
                width: 30,
                height: 8,
            },
            &view,
        );
        assert!(frame.row_text(6).contains("! token 1: entropy -0.5"));
    }
}
