//! Candidate distribution for the selected token.

use wepr_core::view::SelectedToken;
use wepr_core::InspectionView;
use wepr_ftui_adapter::render::{Rect, RenderFrame, TextRole};
use wepr_ftui_adapter::style::StyleToken;
use wepr_ftui_adapter::widgets::WidgetSpec;

pub const PLACEHOLDER: &str = "Select a token to see top candidates.";
pub const NO_CANDIDATES: &str = "No candidate data for this token.";

const LABEL_CHARS: usize = 8;
const LABEL_WIDTH: usize = LABEL_CHARS + 3;
const PERCENT_WIDTH: usize = 7;

/// Candidate label: control characters made visible, cut to 8 chars plus `...`.
#[must_use]
pub fn candidate_label(token: &str) -> String {
    let visible = token.replace('\n', "\\n").replace('\t', "\\t");
    if visible.chars().count() > LABEL_CHARS {
        let head: String = visible.chars().take(LABEL_CHARS).collect();
        format!("{head}...")
    } else {
        visible
    }
}

#[must_use]
pub fn format_percent(prob: f64) -> String {
    format!("{:.1}%", prob * 100.0)
}

#[must_use]
pub fn title(selected: Option<&SelectedToken>) -> String {
    match selected {
        Some(selected) => format!("Distribution: {:?}", selected.metric.token),
        None => WidgetSpec::distribution_panel().title.to_owned(),
    }
}

#[must_use]
pub fn stats_line(selected: &SelectedToken) -> String {
    let norm = selected
        .metric
        .normalized_entropy
        .map_or_else(|| "N/A".to_owned(), |n| format!("{n:.2}"));
    format!("Entropy: {:.4}  Norm: {norm}", selected.metric.entropy)
}

pub fn render(frame: &mut RenderFrame, rect: Rect, view: &InspectionView) {
    let spec = WidgetSpec::distribution_panel();
    let selected = view.selected_token.as_ref();
    let inner = frame.draw_panel(rect, &title(selected), spec.border, TextRole::Muted);
    if inner.width < 3 || inner.height == 0 {
        return;
    }
    let content = Rect {
        x: inner.x + 1,
        width: inner.width - 2,
        ..inner
    };

    let Some(selected) = selected else {
        frame.draw_text_in_rect(content, 0, 0, PLACEHOLDER, TextRole::Muted);
        return;
    };
    frame.draw_text_in_rect(content, 0, 0, &stats_line(selected), TextRole::Info);

    let candidates = &selected.metric.candidates;
    if candidates.is_empty() {
        if content.height > 1 {
            frame.draw_text_in_rect(content, 0, 1, NO_CANDIDATES, TextRole::Muted);
        }
        return;
    }

    let gauge_width = content.width.saturating_sub(LABEL_WIDTH + 1 + PERCENT_WIDTH);
    for (row, candidate) in candidates.iter().enumerate() {
        let y = row + 2;
        if y >= content.height {
            break;
        }
        let chosen = candidate.token == selected.metric.token;
        let role = if chosen { TextRole::Focus } else { TextRole::Primary };
        frame.draw_text_in_rect(content, 0, y, &candidate_label(&candidate.token), role);

        let color = if chosen {
            frame.token_color(StyleToken::Focus)
        } else {
            frame.token_color(StyleToken::Accent)
        };
        frame.draw_gauge(content.x + LABEL_WIDTH + 1, content.y + y, gauge_width, candidate.prob, color);

        let percent = format!("{:>width$}", format_percent(candidate.prob), width = PERCENT_WIDTH);
        frame.draw_text_in_rect(content, LABEL_WIDTH + 1 + gauge_width, y, &percent, role);
    }
}
