//! Response text with per-token risk highlighting.

use wepr_core::InspectionView;
use wepr_ftui_adapter::render::{Rect, RenderFrame, TextRole};
use wepr_ftui_adapter::widgets::WidgetSpec;

use crate::theme::token_style;

pub const EMPTY_TEXT: &str = "Waiting for a response.";

/// Glyph standing in for a token that is nothing but a line break.
pub const NEWLINE_MARK: char = '↵';

/// A contiguous run of one token's glyphs on one wrapped line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedRun {
    pub index: usize,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

/// Word-wrap tokens into `width` columns.
///
/// A token that does not fit on the current line moves to the next one
/// (dropping its leading spaces); a token wider than a full line is split.
/// Embedded newlines break the line.
///
/// Every token gets at least one run: a bare line break shows as
/// [`NEWLINE_MARK`] and whitespace dropped at a wrap keeps a single space.
#[must_use]
pub fn wrap_tokens<'a, I>(tokens: I, width: usize) -> Vec<PlacedRun>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut runs = Vec::new();
    if width == 0 {
        return runs;
    }
    let mut line = 0;
    let mut column = 0;

    for (index, token) in tokens.into_iter().enumerate() {
        let first_run = runs.len();
        for (segment_no, segment) in token.split('\n').enumerate() {
            if segment_no > 0 {
                if runs.len() == first_run {
                    if column >= width {
                        line += 1;
                        column = 0;
                    }
                    runs.push(PlacedRun {
                        index,
                        line,
                        column,
                        text: NEWLINE_MARK.to_string(),
                    });
                }
                line += 1;
                column = 0;
            }
            let mut chars: Vec<char> = segment.chars().filter(|ch| *ch != '\r').collect();
            if chars.is_empty() {
                continue;
            }
            if column > 0 && column + chars.len() > width {
                line += 1;
                column = 0;
                let skip = chars.iter().take_while(|ch| **ch == ' ').count();
                chars.drain(..skip);
                if chars.is_empty() {
                    if runs.len() > first_run {
                        continue;
                    }
                    chars.push(' ');
                }
            }

            let mut current = String::new();
            let mut start = column;
            for ch in chars {
                if column >= width {
                    push_run(&mut runs, index, line, start, &mut current);
                    line += 1;
                    column = 0;
                    start = 0;
                }
                current.push(if ch == '\t' { ' ' } else { ch });
                column += 1;
            }
            push_run(&mut runs, index, line, start, &mut current);
        }
    }
    runs
}

fn push_run(runs: &mut Vec<PlacedRun>, index: usize, line: usize, column: usize, text: &mut String) {
    if text.is_empty() {
        return;
    }
    runs.push(PlacedRun {
        index,
        line,
        column,
        text: std::mem::take(text),
    });
}

/// First visible line for a `height`-row window.
///
/// Starts from `requested`, clamped so the last line can reach the bottom
/// but not beyond, then moved just enough to keep `selected` fully visible.
#[must_use]
pub fn scroll_offset(
    runs: &[PlacedRun],
    selected: Option<usize>,
    height: usize,
    requested: usize,
) -> usize {
    if height == 0 {
        return 0;
    }
    let line_count = runs.iter().map(|run| run.line + 1).max().unwrap_or(0);
    let mut offset = requested.min(line_count.saturating_sub(height));

    let Some(selected) = selected else {
        return offset;
    };
    let mut lines = runs
        .iter()
        .filter(|run| run.index == selected)
        .map(|run| run.line);
    let Some(first) = lines.next() else {
        return offset;
    };
    let last = lines.max().unwrap_or(first);
    if last >= offset + height {
        offset = (last + 1).saturating_sub(height);
    }
    if first < offset {
        offset = first;
    }
    offset
}

fn content_area(inner: Rect) -> Option<Rect> {
    if inner.width < 3 || inner.height == 0 {
        return None;
    }
    Some(Rect {
        x: inner.x + 1,
        width: inner.width - 2,
        ..inner
    })
}

fn layout_runs(view: &InspectionView, width: usize) -> Vec<PlacedRun> {
    if view.chart_series.is_empty() {
        // Text arrived without per-token metrics; wrap it on spaces.
        wrap_tokens(view.response_text.split_inclusive(' '), width)
    } else {
        wrap_tokens(view.chart_series.iter().map(|point| point.token.as_str()), width)
    }
}

/// Offset `render` would use for the panel at `rect` given `requested`.
#[must_use]
pub fn visible_offset(rect: Rect, view: &InspectionView, requested: usize) -> usize {
    let Some(content) = content_area(rect.inner()) else {
        return 0;
    };
    let runs = layout_runs(view, content.width);
    let selected = view.selected_token.as_ref().map(|selected| selected.index);
    scroll_offset(&runs, selected, content.height, requested)
}

/// Draw the response panel scrolled to `requested` (adjusted to keep the
/// selection visible). Returns the first line actually shown.
pub fn render(frame: &mut RenderFrame, rect: Rect, view: &InspectionView, requested: usize) -> usize {
    let spec = WidgetSpec::response_panel();
    let inner = frame.draw_panel(rect, spec.title, spec.border, TextRole::Muted);
    let Some(content) = content_area(inner) else {
        return 0;
    };

    if view.chart_series.is_empty() && view.response_text.trim().is_empty() {
        frame.draw_text_in_rect(content, 0, 0, EMPTY_TEXT, TextRole::Muted);
        return 0;
    }

    let selected = view.selected_token.as_ref().map(|selected| selected.index);
    let runs = layout_runs(view, content.width);
    let offset = scroll_offset(&runs, selected, content.height, requested);

    for run in &runs {
        if run.line < offset || run.line - offset >= content.height {
            continue;
        }
        let style = if view.chart_series.is_empty() {
            frame.role_style(TextRole::Primary)
        } else {
            let tier = view.highlight_per_token.get(run.index).copied().flatten();
            token_style(frame, tier, selected == Some(run.index))
        };
        frame.draw_with_style(
            content.x + run.column,
            content.y + run.line - offset,
            &run.text,
            style,
            content.x + content.width,
        );
    }
    offset
}
