//! Entropy trend: one column per token position, scaled to the peak entropy.

use wepr_core::InspectionView;
use wepr_ftui_adapter::render::{CellStyle, Rect, RenderFrame, TextRole};
use wepr_ftui_adapter::style::StyleToken;
use wepr_ftui_adapter::widgets::WidgetSpec;

use crate::theme::bar_color;

pub const HINT: &str = "Click chart or use arrows to trace entropy.";
pub const EMPTY_CHART: &str = "No entropy data yet.";

/// Bar region for a chart panel occupying `panel`: below the header row,
/// above the hint row.
#[must_use]
pub fn bar_area(panel: Rect) -> Rect {
    let inner = panel.inner();
    Rect {
        x: inner.x,
        y: inner.y + 1,
        width: inner.width,
        height: inner.height.saturating_sub(2),
    }
}

/// Columns per token when every token gets its own slot, else 1.
fn span(token_count: usize, width: usize) -> usize {
    if token_count == 0 {
        return 1;
    }
    (width / token_count).max(1)
}

/// Token position drawn at `column` of a bar area `width` cells wide.
///
/// With more tokens than columns each column samples one position.
#[must_use]
pub fn position_for_column(column: usize, token_count: usize, width: usize) -> Option<usize> {
    if token_count == 0 || column >= width {
        return None;
    }
    if token_count > width {
        return Some(column * token_count / width);
    }
    let index = column / span(token_count, width);
    (index < token_count).then_some(index)
}

/// Peak finite entropy in the series, or 0 when there is none.
#[must_use]
pub fn peak_entropy(view: &InspectionView) -> f64 {
    view.chart_series
        .iter()
        .map(|point| point.entropy)
        .filter(|entropy| entropy.is_finite())
        .fold(0.0, f64::max)
}

fn header(view: &InspectionView) -> String {
    match &view.selected_token {
        Some(selected) => format!(
            "Token {}/{} {:?}  H={:.4}",
            selected.index + 1,
            view.token_count,
            selected.metric.token,
            selected.metric.entropy
        ),
        None => format!(
            "max {:.2}  {} tokens",
            peak_entropy(view),
            view.chart_series.len()
        ),
    }
}

pub fn render(frame: &mut RenderFrame, rect: Rect, view: &InspectionView) {
    let spec = WidgetSpec::entropy_panel();
    let inner = frame.draw_panel(rect, spec.title, spec.border, TextRole::Muted);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    frame.draw_text_in_rect(
        inner,
        0,
        inner.height.saturating_sub(1),
        HINT,
        TextRole::Muted,
    );

    if view.chart_series.is_empty() {
        if inner.height > 1 {
            frame.draw_text_in_rect(inner, 0, 0, EMPTY_CHART, TextRole::Muted);
        }
        return;
    }
    if inner.height < 3 {
        return;
    }
    frame.draw_text_in_rect(inner, 0, 0, &header(view), TextRole::Info);

    let area = bar_area(rect);
    if area.width == 0 || area.height == 0 {
        return;
    }
    let count = view.chart_series.len();
    let peak = peak_entropy(view);
    let slot = span(count, area.width);
    let selected = view.selected_token.as_ref().map(|selected| selected.index);
    let base_y = area.y + area.height - 1;
    let bg = frame.token_color(StyleToken::Background);

    for column in 0..area.width {
        let Some(index) = position_for_column(column, count, area.width) else {
            break;
        };
        if count <= area.width && slot > 2 && column % slot == slot - 1 {
            continue;
        }
        let Some(point) = view.chart_series.get(index) else {
            break;
        };
        let ratio = if peak > 0.0 { point.entropy / peak } else { 0.0 };
        let tier = view.highlight_per_token.get(index).copied().flatten();
        let style = CellStyle {
            fg: bar_color(frame, tier, selected == Some(index)),
            bg,
            bold: false,
            dim: false,
            underline: false,
        };
        frame.draw_column(area.x + column, base_y, area.height, ratio, style);
    }
}
