//! wepr-ftui-adapter: boundary layer between inspection surfaces and the terminal.
//!
//! Surface crates draw into a [`render::RenderFrame`] and consume
//! [`input::InputEvent`]s; only the binary runtime touches a real terminal.

/// Package name of this crate.
pub fn crate_label() -> &'static str {
    "wepr-ftui-adapter"
}

/// Style and theme primitives consumed by the inspection surfaces.
pub mod style {
    /// Logical theme choices supported by the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ThemeKind {
        Dark,
        Light,
        HighContrast,
    }

    impl ThemeKind {
        /// Parse a theme name; unknown names fall back to dark.
        #[must_use]
        pub fn parse(raw: &str) -> Self {
            match raw.trim().to_ascii_lowercase().as_str() {
                "light" => Self::Light,
                "high-contrast" | "high_contrast" | "contrast" => Self::HighContrast,
                _ => Self::Dark,
            }
        }
    }

    /// Stable style tokens exposed to surface crates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StyleToken {
        Background,
        Surface,
        Foreground,
        Muted,
        Accent,
        Success,
        Danger,
        Warning,
        Info,
        Focus,
        HighlightHigh,
        HighlightMedium,
    }

    /// Adapter palette uses terminal 256-color indexes for portability.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Palette {
        pub background: u8,
        pub surface: u8,
        pub foreground: u8,
        pub muted: u8,
        pub accent: u8,
        pub success: u8,
        pub danger: u8,
        pub warning: u8,
        pub info: u8,
        pub focus: u8,
        /// Background behind high-risk token text.
        pub highlight_high: u8,
        /// Background behind medium-risk token text.
        pub highlight_medium: u8,
    }

    /// Typography emphasis policy per theme.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypographySpec {
        pub accent_bold: bool,
        pub danger_bold: bool,
        pub warning_bold: bool,
        pub muted_dim: bool,
        pub focus_underline: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ThemeSpec {
        pub kind: ThemeKind,
        pub palette: Palette,
        pub typography: TypographySpec,
    }

    impl ThemeSpec {
        /// Returns the color index for a stable style token.
        #[must_use]
        pub fn color(self, token: StyleToken) -> u8 {
            match token {
                StyleToken::Background => self.palette.background,
                StyleToken::Surface => self.palette.surface,
                StyleToken::Foreground => self.palette.foreground,
                StyleToken::Muted => self.palette.muted,
                StyleToken::Accent => self.palette.accent,
                StyleToken::Success => self.palette.success,
                StyleToken::Danger => self.palette.danger,
                StyleToken::Warning => self.palette.warning,
                StyleToken::Info => self.palette.info,
                StyleToken::Focus => self.palette.focus,
                StyleToken::HighlightHigh => self.palette.highlight_high,
                StyleToken::HighlightMedium => self.palette.highlight_medium,
            }
        }

        /// Builds a theme for the requested style family.
        #[must_use]
        pub fn for_kind(kind: ThemeKind) -> Self {
            let palette = match kind {
                ThemeKind::Dark => Palette {
                    background: 16,
                    surface: 235,
                    foreground: 252,
                    muted: 244,
                    accent: 45,
                    success: 41,
                    danger: 197,
                    warning: 220,
                    info: 117,
                    focus: 81,
                    highlight_high: 52,
                    highlight_medium: 58,
                },
                ThemeKind::Light => Palette {
                    background: 255,
                    surface: 252,
                    foreground: 234,
                    muted: 244,
                    accent: 25,
                    success: 28,
                    danger: 160,
                    warning: 172,
                    info: 31,
                    focus: 21,
                    highlight_high: 224,
                    highlight_medium: 230,
                },
                ThemeKind::HighContrast => Palette {
                    background: 16,
                    surface: 232,
                    foreground: 231,
                    muted: 250,
                    accent: 51,
                    success: 118,
                    danger: 203,
                    warning: 226,
                    info: 159,
                    focus: 229,
                    highlight_high: 124,
                    highlight_medium: 136,
                },
            };
            let typography = match kind {
                ThemeKind::Dark => TypographySpec {
                    accent_bold: true,
                    danger_bold: true,
                    warning_bold: true,
                    muted_dim: true,
                    focus_underline: true,
                },
                ThemeKind::Light => TypographySpec {
                    accent_bold: true,
                    danger_bold: true,
                    warning_bold: true,
                    muted_dim: false,
                    focus_underline: true,
                },
                ThemeKind::HighContrast => TypographySpec {
                    accent_bold: true,
                    danger_bold: true,
                    warning_bold: true,
                    muted_dim: false,
                    focus_underline: true,
                },
            };
            Self {
                kind,
                palette,
                typography,
            }
        }
    }

    impl Default for ThemeSpec {
        fn default() -> Self {
            Self::for_kind(ThemeKind::Dark)
        }
    }
}

/// Render and frame primitives consumed by the inspection surfaces.
pub mod render {
    use super::style::{StyleToken, ThemeSpec};
    use super::widgets::BorderStyle;

    /// Terminal color: ANSI256 index or 24-bit RGB.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TermColor {
        Ansi256(u8),
        Rgb(u8, u8, u8),
    }

    /// Frame dimensions in terminal cells.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameSize {
        pub width: usize,
        pub height: usize,
    }

    /// A rectangular region within a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Rect {
        pub x: usize,
        pub y: usize,
        pub width: usize,
        pub height: usize,
    }

    impl Rect {
        #[must_use]
        pub fn from_size(size: FrameSize) -> Self {
            Self {
                x: 0,
                y: 0,
                width: size.width,
                height: size.height,
            }
        }

        /// Inner region after removing border (1 cell each side).
        #[must_use]
        pub fn inner(self) -> Self {
            if self.width < 2 || self.height < 2 {
                return Self {
                    x: self.x,
                    y: self.y,
                    width: 0,
                    height: 0,
                };
            }
            Self {
                x: self.x + 1,
                y: self.y + 1,
                width: self.width - 2,
                height: self.height - 2,
            }
        }

        /// Split into left (width=`left_width`) and right.
        #[must_use]
        pub fn split_horizontal(self, left_width: usize) -> (Self, Self) {
            let left_w = left_width.min(self.width);
            let right_w = self.width.saturating_sub(left_w);
            (
                Self {
                    width: left_w,
                    ..self
                },
                Self {
                    x: self.x + left_w,
                    width: right_w,
                    ..self
                },
            )
        }

        /// Split into top (height=`top_height`) and bottom.
        #[must_use]
        pub fn split_vertical(self, top_height: usize) -> (Self, Self) {
            let top_h = top_height.min(self.height);
            let bot_h = self.height.saturating_sub(top_h);
            (
                Self {
                    height: top_h,
                    ..self
                },
                Self {
                    y: self.y + top_h,
                    height: bot_h,
                    ..self
                },
            )
        }

        /// Whether the absolute cell `(x, y)` lies inside this rect.
        #[must_use]
        pub fn contains(self, x: usize, y: usize) -> bool {
            x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
        }
    }

    /// Cell style represented as terminal colors and text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellStyle {
        pub fg: TermColor,
        pub bg: TermColor,
        pub bold: bool,
        pub dim: bool,
        pub underline: bool,
    }

    /// A single frame cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameCell {
        pub glyph: char,
        pub style: CellStyle,
    }

    /// Semantic role for rendered text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TextRole {
        Primary,
        Muted,
        Accent,
        Success,
        Danger,
        Warning,
        Info,
        Focus,
    }

    struct BorderChars {
        top_left: char,
        top_right: char,
        bottom_left: char,
        bottom_right: char,
        horizontal: char,
        vertical: char,
    }

    fn border_chars(style: BorderStyle) -> BorderChars {
        match style {
            BorderStyle::Rounded => BorderChars {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
            BorderStyle::Plain => BorderChars {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
        }
    }

    /// Stable frame abstraction shielding surface crates from terminal internals.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RenderFrame {
        size: FrameSize,
        cells: Vec<FrameCell>,
        theme: ThemeSpec,
    }

    impl RenderFrame {
        /// Create a blank frame using the provided adapter theme.
        #[must_use]
        pub fn new(size: FrameSize, theme: ThemeSpec) -> Self {
            let default_cell = FrameCell {
                glyph: ' ',
                style: CellStyle {
                    fg: TermColor::Ansi256(theme.color(StyleToken::Foreground)),
                    bg: TermColor::Ansi256(theme.color(StyleToken::Background)),
                    bold: false,
                    dim: false,
                    underline: false,
                },
            };
            Self {
                size,
                cells: vec![default_cell; size.width.saturating_mul(size.height)],
                theme,
            }
        }

        #[must_use]
        pub fn theme(&self) -> ThemeSpec {
            self.theme
        }

        #[must_use]
        pub fn size(&self) -> FrameSize {
            self.size
        }

        /// Returns one frame cell for assertions/snapshot helpers.
        #[must_use]
        pub fn cell(&self, x: usize, y: usize) -> Option<FrameCell> {
            if x >= self.size.width || y >= self.size.height {
                return None;
            }
            Some(self.cells[y * self.size.width + x])
        }

        /// Write a single cell, clipped to frame bounds.
        pub fn set_cell(&mut self, x: usize, y: usize, cell: FrameCell) {
            if x >= self.size.width || y >= self.size.height {
                return;
            }
            self.cells[y * self.size.width + x] = cell;
        }

        /// Style for `role` on the theme background.
        #[must_use]
        pub fn role_style(&self, role: TextRole) -> CellStyle {
            let (bold, dim, underline) = self.style_for_role(role);
            CellStyle {
                fg: self.color_for_role(role),
                bg: self.token_color(StyleToken::Background),
                bold,
                dim,
                underline,
            }
        }

        #[must_use]
        pub fn token_color(&self, token: StyleToken) -> TermColor {
            TermColor::Ansi256(self.theme.color(token))
        }

        /// Draw text on a single row, clipped to frame width.
        pub fn draw_text(&mut self, x: usize, y: usize, text: &str, role: TextRole) {
            let style = self.role_style(role);
            self.draw_with_style(x, y, text, style, self.size.width);
        }

        /// Draw text with an explicit cell style, clipped at column `limit`.
        /// Returns the number of cells written.
        pub fn draw_with_style(
            &mut self,
            x: usize,
            y: usize,
            text: &str,
            style: CellStyle,
            limit: usize,
        ) -> usize {
            if y >= self.size.height {
                return 0;
            }
            let limit = limit.min(self.size.width);
            let mut written = 0;
            for (offset, glyph) in text.chars().enumerate() {
                let col = x + offset;
                if col >= limit {
                    break;
                }
                self.cells[y * self.size.width + col] = FrameCell { glyph, style };
                written += 1;
            }
            written
        }

        /// Draw text within a rect, clipped to rect bounds.
        pub fn draw_text_in_rect(
            &mut self,
            rect: Rect,
            x_offset: usize,
            y_offset: usize,
            text: &str,
            role: TextRole,
        ) {
            if y_offset >= rect.height {
                return;
            }
            let style = self.role_style(role);
            self.draw_with_style(
                rect.x + x_offset,
                rect.y + y_offset,
                text,
                style,
                rect.x + rect.width,
            );
        }

        /// Draw a bordered panel with a title into a rectangular region.
        ///
        /// Returns the inner `Rect` (content area inside the border).
        pub fn draw_panel(
            &mut self,
            rect: Rect,
            title: &str,
            border: BorderStyle,
            border_role: TextRole,
        ) -> Rect {
            if rect.width < 2 || rect.height < 2 {
                return Rect {
                    x: rect.x,
                    y: rect.y,
                    width: 0,
                    height: 0,
                };
            }

            let chars = border_chars(border);
            let border_style = CellStyle {
                bold: false,
                dim: false,
                underline: false,
                ..self.role_style(border_role)
            };
            self.fill_bg(rect, self.token_color(StyleToken::Background));

            let right = rect.x + rect.width - 1;
            let bottom = rect.y + rect.height - 1;
            for col in rect.x + 1..right {
                self.set_cell(col, rect.y, FrameCell { glyph: chars.horizontal, style: border_style });
                self.set_cell(col, bottom, FrameCell { glyph: chars.horizontal, style: border_style });
            }
            for row in rect.y + 1..bottom {
                self.set_cell(rect.x, row, FrameCell { glyph: chars.vertical, style: border_style });
                self.set_cell(right, row, FrameCell { glyph: chars.vertical, style: border_style });
            }
            self.set_cell(rect.x, rect.y, FrameCell { glyph: chars.top_left, style: border_style });
            self.set_cell(right, rect.y, FrameCell { glyph: chars.top_right, style: border_style });
            self.set_cell(rect.x, bottom, FrameCell { glyph: chars.bottom_left, style: border_style });
            self.set_cell(right, bottom, FrameCell { glyph: chars.bottom_right, style: border_style });

            // Title overlays the top border: ╭─ Title ─╮
            if !title.is_empty() && rect.width > 4 {
                let truncated: String = title.chars().take(rect.width - 4).collect();
                let title_style = CellStyle {
                    bold: true,
                    ..border_style
                };
                self.draw_with_style(rect.x + 2, rect.y, &format!(" {truncated} "), title_style, right);
            }

            rect.inner()
        }

        /// Draw a gauge at (x, y) with given width. `ratio` is clamped to
        /// 0.0..=1.0 and uses block characters for sub-cell precision.
        pub fn draw_gauge(&mut self, x: usize, y: usize, width: usize, ratio: f64, filled: TermColor) {
            if width == 0 || y >= self.size.height {
                return;
            }
            let clamped = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
            let filled_exact = clamped * width as f64;
            let full_blocks = filled_exact as usize;
            let remainder = filled_exact - full_blocks as f64;

            let bg = self.token_color(StyleToken::Background);
            let filled_style = CellStyle {
                fg: filled,
                bg,
                bold: false,
                dim: false,
                underline: false,
            };
            let empty_style = CellStyle {
                fg: self.token_color(StyleToken::Surface),
                ..filled_style
            };

            for i in 0..width {
                let (glyph, style) = if i < full_blocks {
                    ('\u{2588}', filled_style)
                } else if i == full_blocks {
                    match partial_horizontal(remainder) {
                        Some(glyph) => (glyph, filled_style),
                        None => ('\u{2591}', empty_style),
                    }
                } else {
                    ('\u{2591}', empty_style)
                };
                self.set_cell(x + i, y, FrameCell { glyph, style });
            }
        }

        /// Draw one vertical column of height `rows`, bottom-anchored at
        /// `base_y`, filled to `ratio` with eighth-block precision.
        pub fn draw_column(&mut self, x: usize, base_y: usize, rows: usize, ratio: f64, style: CellStyle) {
            if rows == 0 {
                return;
            }
            let clamped = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
            let filled_exact = clamped * rows as f64;
            let full = filled_exact as usize;
            let remainder = filled_exact - full as f64;
            for step in 0..rows {
                let Some(y) = base_y.checked_sub(step) else {
                    break;
                };
                let glyph = if step < full {
                    '\u{2588}'
                } else if step == full && remainder > 0.0 {
                    partial_block(remainder)
                } else {
                    continue;
                };
                self.set_cell(x, y, FrameCell { glyph, style });
            }
        }

        /// Fill a rectangular region with a background color.
        pub fn fill_bg(&mut self, rect: Rect, bg: TermColor) {
            let style = CellStyle {
                fg: self.token_color(StyleToken::Foreground),
                bg,
                bold: false,
                dim: false,
                underline: false,
            };
            for row in rect.y..rect.y + rect.height {
                for col in rect.x..rect.x + rect.width {
                    self.set_cell(col, row, FrameCell { glyph: ' ', style });
                }
            }
        }

        #[must_use]
        pub fn row_text(&self, y: usize) -> String {
            if y >= self.size.height {
                return String::new();
            }
            let start = y * self.size.width;
            let end = start + self.size.width;
            self.cells[start..end].iter().map(|cell| cell.glyph).collect()
        }

        /// Text-only snapshot helper for lightweight regression tests.
        #[must_use]
        pub fn snapshot(&self) -> String {
            (0..self.size.height)
                .map(|row| self.row_text(row))
                .collect::<Vec<_>>()
                .join("\n")
        }

        /// Returns the `TermColor` for a semantic role.
        #[must_use]
        pub fn color_for_role(&self, role: TextRole) -> TermColor {
            self.token_color(match role {
                TextRole::Primary => StyleToken::Foreground,
                TextRole::Muted => StyleToken::Muted,
                TextRole::Accent => StyleToken::Accent,
                TextRole::Success => StyleToken::Success,
                TextRole::Danger => StyleToken::Danger,
                TextRole::Warning => StyleToken::Warning,
                TextRole::Info => StyleToken::Info,
                TextRole::Focus => StyleToken::Focus,
            })
        }

        fn style_for_role(&self, role: TextRole) -> (bool, bool, bool) {
            let typography = self.theme.typography;
            match role {
                TextRole::Primary | TextRole::Info | TextRole::Success => (false, false, false),
                TextRole::Muted => (false, typography.muted_dim, false),
                TextRole::Accent => (typography.accent_bold, false, false),
                TextRole::Danger => (typography.danger_bold, false, false),
                TextRole::Warning => (typography.warning_bold, false, false),
                TextRole::Focus => (true, false, typography.focus_underline),
            }
        }
    }

    fn partial_horizontal(fraction: f64) -> Option<char> {
        match (fraction * 8.0) as usize {
            0 => None,
            1 => Some('\u{258F}'),
            2 => Some('\u{258E}'),
            3 => Some('\u{258D}'),
            4 => Some('\u{258C}'),
            5 => Some('\u{258B}'),
            6 => Some('\u{258A}'),
            _ => Some('\u{2589}'),
        }
    }

    fn partial_block(fraction: f64) -> char {
        match (fraction * 8.0) as usize {
            0 => '\u{2581}',
            1 => '\u{2582}',
            2 => '\u{2583}',
            3 => '\u{2584}',
            4 => '\u{2585}',
            5 => '\u{2586}',
            _ => '\u{2587}',
        }
    }
}

/// Stable widget primitives consumed by the inspection surfaces.
pub mod widgets {
    /// Border treatment exposed by the adapter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BorderStyle {
        Plain,
        Rounded,
    }

    /// Panel description shared by layout and rendering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WidgetSpec {
        pub id: &'static str,
        pub title: &'static str,
        pub border: BorderStyle,
    }

    impl WidgetSpec {
        /// Highlighted response text.
        #[must_use]
        pub fn response_panel() -> Self {
            Self {
                id: "inspect.response",
                title: "Response",
                border: BorderStyle::Rounded,
            }
        }

        /// Aggregate entropy and risk badge.
        #[must_use]
        pub fn summary_panel() -> Self {
            Self {
                id: "inspect.summary",
                title: "Total EPR",
                border: BorderStyle::Rounded,
            }
        }

        /// Entropy over token position.
        #[must_use]
        pub fn entropy_panel() -> Self {
            Self {
                id: "inspect.entropy",
                title: "Entropy Flow",
                border: BorderStyle::Plain,
            }
        }

        /// Candidate distribution for the selected token.
        #[must_use]
        pub fn distribution_panel() -> Self {
            Self {
                id: "inspect.distribution",
                title: "Token Distribution",
                border: BorderStyle::Plain,
            }
        }
    }
}

/// Snapshot helpers for adapter-based render abstractions.
pub mod snapshot;

/// Stable input/event abstraction shielding surface crates from terminal key models.
pub mod input {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Key {
        Char(char),
        Enter,
        Escape,
        Tab,
        Backspace,
        Up,
        Down,
        Left,
        Right,
        Home,
        End,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers {
        pub shift: bool,
        pub ctrl: bool,
        pub alt: bool,
    }

    impl Modifiers {
        #[must_use]
        pub const fn none() -> Self {
            Self {
                shift: false,
                ctrl: false,
                alt: false,
            }
        }

        #[must_use]
        pub const fn ctrl() -> Self {
            Self {
                shift: false,
                ctrl: true,
                alt: false,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyEvent {
        pub key: Key,
        pub modifiers: Modifiers,
    }

    impl KeyEvent {
        #[must_use]
        pub const fn plain(key: Key) -> Self {
            Self {
                key,
                modifiers: Modifiers::none(),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MouseWheelDirection {
        Up,
        Down,
    }

    /// Mouse event in absolute frame cells.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MouseEvent {
        pub wheel: Option<MouseWheelDirection>,
        /// Left-button press position, if this event is a click.
        pub click: Option<(usize, usize)>,
    }

    impl MouseEvent {
        #[must_use]
        pub const fn click(x: usize, y: usize) -> Self {
            Self {
                wheel: None,
                click: Some((x, y)),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResizeEvent {
        pub width: usize,
        pub height: usize,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InputEvent {
        Key(KeyEvent),
        Mouse(MouseEvent),
        Resize(ResizeEvent),
        Tick,
    }

    /// Stable high-level actions produced by adapter input translation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UiAction {
        Noop,
        MoveLeft,
        MoveRight,
        JumpStart,
        JumpEnd,
        Cancel,
        NextResponse,
        Click { x: usize, y: usize },
        ScrollUp,
        ScrollDown,
        Refresh,
        Quit,
    }

    /// Keymap for the inspection surface.
    #[must_use]
    pub fn translate_input(event: &InputEvent) -> UiAction {
        match event {
            InputEvent::Key(KeyEvent {
                key: Key::Char('c'),
                modifiers,
            }) if modifiers.ctrl => UiAction::Quit,
            InputEvent::Key(KeyEvent { key, .. }) => match key {
                Key::Left | Key::Char('h') => UiAction::MoveLeft,
                Key::Right | Key::Char('l') => UiAction::MoveRight,
                Key::Home | Key::Char('g') => UiAction::JumpStart,
                Key::End | Key::Char('G') => UiAction::JumpEnd,
                Key::Escape => UiAction::Cancel,
                Key::Char('n') => UiAction::NextResponse,
                Key::Char('q') => UiAction::Quit,
                Key::Up | Key::Char('k') => UiAction::ScrollUp,
                Key::Down | Key::Char('j') => UiAction::ScrollDown,
                _ => UiAction::Noop,
            },
            InputEvent::Mouse(MouseEvent {
                click: Some((x, y)),
                ..
            }) => UiAction::Click { x: *x, y: *y },
            InputEvent::Mouse(MouseEvent {
                wheel: Some(MouseWheelDirection::Up),
                ..
            }) => UiAction::ScrollUp,
            InputEvent::Mouse(MouseEvent {
                wheel: Some(MouseWheelDirection::Down),
                ..
            }) => UiAction::ScrollDown,
            InputEvent::Mouse(_) => UiAction::Noop,
            InputEvent::Resize(_) | InputEvent::Tick => UiAction::Refresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::input::{
        translate_input, InputEvent, Key, KeyEvent, Modifiers, MouseEvent, MouseWheelDirection,
        ResizeEvent, UiAction,
    };
    use super::render::{FrameSize, Rect, RenderFrame, TermColor, TextRole};
    use super::snapshot::assert_render_frame_snapshot;
    use super::style::{StyleToken, ThemeKind, ThemeSpec};
    use super::widgets::{BorderStyle, WidgetSpec};
    use super::crate_label;

    fn frame(width: usize, height: usize) -> RenderFrame {
        RenderFrame::new(FrameSize { width, height }, ThemeSpec::default())
    }

    #[test]
    fn crate_label_is_stable() {
        assert_eq!(crate_label(), "wepr-ftui-adapter");
    }

    #[test]
    fn default_theme_is_dark() {
        let theme = ThemeSpec::default();
        assert_eq!(theme.kind, ThemeKind::Dark);
        assert_eq!(theme.color(StyleToken::Accent), 45);
        assert_eq!(theme.color(StyleToken::HighlightHigh), 52);
    }

    #[test]
    fn theme_kind_parse() {
        assert_eq!(ThemeKind::parse("Light"), ThemeKind::Light);
        assert_eq!(ThemeKind::parse("high-contrast"), ThemeKind::HighContrast);
        assert_eq!(ThemeKind::parse("whatever"), ThemeKind::Dark);
    }

    #[test]
    fn render_frame_text_snapshot() {
        let mut f = frame(12, 2);
        f.draw_text(0, 0, "wepr", TextRole::Accent);
        f.draw_text(0, 1, "ready", TextRole::Muted);
        assert_eq!(f.snapshot(), "wepr        \nready       ");
    }

    #[test]
    fn render_frame_uses_role_color_tokens() {
        let theme = ThemeSpec::for_kind(ThemeKind::Dark);
        let mut f = frame(4, 1);
        f.draw_text(1, 0, "!", TextRole::Focus);
        let cell = f.cell(1, 0).map(|cell| (cell.style.fg, cell.style.underline));
        assert_eq!(
            cell,
            Some((TermColor::Ansi256(theme.color(StyleToken::Focus)), true))
        );
    }

    #[test]
    fn panel_draws_border_and_title() {
        let mut f = frame(14, 3);
        let inner = f.draw_panel(
            Rect {
                x: 0,
                y: 0,
                width: 14,
                height: 3,
            },
            "Entropy",
            BorderStyle::Rounded,
            TextRole::Muted,
        );
        assert_eq!(
            inner,
            Rect {
                x: 1,
                y: 1,
                width: 12,
                height: 1
            }
        );
        assert_render_frame_snapshot(
            "panel",
            &f,
            "╭─ Entropy ──╮\n│            │\n╰────────────╯",
        );
    }

    #[test]
    fn gauge_fills_proportionally() {
        let mut f = frame(4, 1);
        f.draw_gauge(0, 0, 4, 0.5, TermColor::Ansi256(45));
        assert_eq!(f.row_text(0), "██░░");
    }

    #[test]
    fn column_is_bottom_anchored() {
        let mut f = frame(1, 4);
        let style = f.role_style(TextRole::Accent);
        f.draw_column(0, 3, 4, 0.5, style);
        assert_eq!(f.snapshot(), " \n \n█\n█");
    }

    #[test]
    fn text_in_rect_is_clipped() {
        let mut f = frame(8, 1);
        f.draw_text_in_rect(
            Rect {
                x: 2,
                y: 0,
                width: 3,
                height: 1,
            },
            0,
            0,
            "abcdef",
            TextRole::Primary,
        );
        assert_eq!(f.row_text(0), "  abc   ");
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect {
            x: 2,
            y: 1,
            width: 3,
            height: 2,
        };
        assert!(rect.contains(2, 1));
        assert!(rect.contains(4, 2));
        assert!(!rect.contains(5, 1));
        assert!(!rect.contains(2, 3));
    }

    #[test]
    fn panel_specs_snapshot() {
        let panels = [
            WidgetSpec::response_panel(),
            WidgetSpec::summary_panel(),
            WidgetSpec::entropy_panel(),
            WidgetSpec::distribution_panel(),
        ];
        let snapshot = panels
            .iter()
            .map(|p| format!("{}|{}|{:?}", p.id, p.title, p.border))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(
            snapshot,
            "inspect.response|Response|Rounded\ninspect.summary|Total EPR|Rounded\ninspect.entropy|Entropy Flow|Plain\ninspect.distribution|Token Distribution|Plain"
        );
    }

    #[test]
    fn input_translation_keymap_snapshot() {
        let snapshot = format!(
            "{:?}|{:?}|{:?}|{:?}|{:?}|{:?}",
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Left))),
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Char('l')))),
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Escape))),
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Char('n')))),
            translate_input(&InputEvent::Key(KeyEvent {
                key: Key::Char('c'),
                modifiers: Modifiers::ctrl(),
            })),
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Char('c')))),
        );
        assert_eq!(snapshot, "MoveLeft|MoveRight|Cancel|NextResponse|Quit|Noop");

        let scroll = format!(
            "{:?}|{:?}|{:?}|{:?}|{:?}",
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Up))),
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Char('k')))),
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Down))),
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Char('j')))),
            translate_input(&InputEvent::Key(KeyEvent::plain(Key::Enter))),
        );
        assert_eq!(scroll, "ScrollUp|ScrollUp|ScrollDown|ScrollDown|Noop");
    }

    #[test]
    fn input_translation_mouse() {
        assert_eq!(
            translate_input(&InputEvent::Mouse(MouseEvent::click(7, 3))),
            UiAction::Click { x: 7, y: 3 }
        );
        assert_eq!(
            translate_input(&InputEvent::Mouse(MouseEvent {
                wheel: Some(MouseWheelDirection::Down),
                click: None,
            })),
            UiAction::ScrollDown
        );
    }

    #[test]
    fn input_translation_resize_refreshes() {
        assert_eq!(
            translate_input(&InputEvent::Resize(ResizeEvent {
                width: 120,
                height: 40,
            })),
            UiAction::Refresh
        );
    }
}
