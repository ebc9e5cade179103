//! Tier and selection styling on top of the adapter theme.

use wepr_core::RiskLevel;
use wepr_ftui_adapter::render::{CellStyle, RenderFrame, TermColor, TextRole};
use wepr_ftui_adapter::style::{StyleToken, ThemeKind, ThemeSpec};

#[must_use]
pub fn resolve_theme(name: &str) -> ThemeSpec {
    ThemeSpec::for_kind(ThemeKind::parse(name))
}

/// Text style for a token in the response panel.
///
/// High and medium tiers get a tinted background; low and unclassified
/// tokens render plain. The selected token always wins.
#[must_use]
pub fn token_style(frame: &RenderFrame, tier: Option<RiskLevel>, selected: bool) -> CellStyle {
    let base = frame.role_style(TextRole::Primary);
    if selected {
        return CellStyle {
            fg: frame.token_color(StyleToken::Background),
            bg: frame.token_color(StyleToken::Focus),
            bold: true,
            dim: false,
            underline: false,
        };
    }
    match tier {
        Some(RiskLevel::High) => CellStyle {
            bg: frame.token_color(StyleToken::HighlightHigh),
            fg: frame.token_color(StyleToken::Danger),
            ..base
        },
        Some(RiskLevel::Medium) => CellStyle {
            bg: frame.token_color(StyleToken::HighlightMedium),
            fg: frame.token_color(StyleToken::Warning),
            ..base
        },
        Some(RiskLevel::Low) | None => base,
    }
}

/// Bar color for one entropy column.
#[must_use]
pub fn bar_color(frame: &RenderFrame, tier: Option<RiskLevel>, selected: bool) -> TermColor {
    if selected {
        return frame.token_color(StyleToken::Focus);
    }
    match tier {
        Some(RiskLevel::High) => frame.token_color(StyleToken::Danger),
        Some(RiskLevel::Medium) => frame.token_color(StyleToken::Warning),
        Some(RiskLevel::Low) | None => frame.token_color(StyleToken::Accent),
    }
}
