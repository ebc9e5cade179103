//! Inspection app shell: owns the inspector and the response queue, maps
//! input to cursor operations, and lays out the four surfaces.

use std::collections::VecDeque;

use wepr_core::{Inspector, ResponsePayload, RiskConfig};
use wepr_ftui_adapter::input::{translate_input, InputEvent, UiAction};
use wepr_ftui_adapter::render::{FrameSize, Rect, RenderFrame, TextRole};
use wepr_ftui_adapter::style::{StyleToken, ThemeSpec};

use crate::{distribution_chart, entropy_chart, metrics_panel, text_highlight};

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 30;
pub const KEY_HINTS: &str = "←/→ trace  ↑/↓ scroll  home/end jump  esc reset  n next response  q quit";

const SUMMARY_HEIGHT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Redraw,
    Quit,
}

/// Screen regions for one frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectLayout {
    pub header: Rect,
    pub response: Rect,
    pub chart: Rect,
    pub summary: Rect,
    pub distribution: Rect,
    pub footer: Rect,
}

impl InspectLayout {
    #[must_use]
    pub fn for_size(width: usize, height: usize) -> Self {
        let full = Rect {
            x: 0,
            y: 0,
            width,
            height,
        };
        let (header, rest) = full.split_vertical(1);
        let (body, footer) = rest.split_vertical(rest.height.saturating_sub(1));
        let (left, right) = body.split_horizontal(width * 3 / 5);
        let (response, chart) = left.split_vertical(left.height / 2);
        let (summary, distribution) = right.split_vertical(SUMMARY_HEIGHT.min(right.height));
        Self {
            header,
            response,
            chart,
            summary,
            distribution,
            footer,
        }
    }
}

#[derive(Debug)]
pub struct InspectApp {
    inspector: Inspector,
    queue: VecDeque<ResponsePayload>,
    loaded: usize,
    total: usize,
    theme: ThemeSpec,
    width: usize,
    height: usize,
    /// First visible line of the response panel.
    text_scroll: usize,
    status: Option<String>,
    quitting: bool,
}

impl InspectApp {
    #[must_use]
    pub fn new(risk: RiskConfig, theme: ThemeSpec) -> Self {
        Self {
            inspector: Inspector::new(risk),
            queue: VecDeque::new(),
            loaded: 0,
            total: 0,
            theme,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            text_scroll: 0,
            status: None,
            quitting: false,
        }
    }

    /// Queue responses and load the first one.
    pub fn enqueue(&mut self, payloads: Vec<ResponsePayload>) {
        self.total += payloads.len();
        self.queue.extend(payloads);
        if self.loaded == 0 {
            self.load_next();
        }
    }

    /// Replace the active response with the next queued one.
    /// Returns false when the queue is exhausted.
    pub fn load_next(&mut self) -> bool {
        let Some(payload) = self.queue.pop_front() else {
            self.status = Some("No more responses queued".to_owned());
            return false;
        };
        let generation = self.inspector.on_new_response(payload);
        self.loaded += 1;
        self.text_scroll = 0;
        self.status = None;
        tracing::info!(generation, loaded = self.loaded, total = self.total, "response loaded");
        true
    }

    #[must_use]
    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    pub fn inspector_mut(&mut self) -> &mut Inspector {
        &mut self.inspector
    }

    #[must_use]
    pub fn quitting(&self) -> bool {
        self.quitting
    }

    #[must_use]
    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn layout(&self) -> InspectLayout {
        InspectLayout::for_size(self.width, self.height)
    }

    #[must_use]
    pub fn text_scroll(&self) -> usize {
        self.text_scroll
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn update(&mut self, event: InputEvent) -> Command {
        if let InputEvent::Resize(resize) = event {
            self.width = resize.width;
            self.height = resize.height;
            return Command::Redraw;
        }

        let changed = match translate_input(&event) {
            UiAction::Quit => {
                self.quitting = true;
                return Command::Quit;
            }
            UiAction::MoveLeft => self.inspector.prev(),
            UiAction::MoveRight => self.inspector.next(),
            UiAction::JumpStart => self.inspector.select_by_position(0),
            UiAction::JumpEnd => {
                let len = self.inspector.current().map_or(0, |set| set.len());
                len > 0 && self.inspector.select_by_position(len - 1)
            }
            UiAction::Cancel => self.inspector.reset_to_none(),
            UiAction::NextResponse => {
                self.load_next();
                true
            }
            UiAction::Click { x, y } => self.click(x, y),
            UiAction::ScrollUp => self.scroll_text(false),
            UiAction::ScrollDown => self.scroll_text(true),
            UiAction::Refresh => true,
            UiAction::Noop => false,
        };
        if changed {
            Command::Redraw
        } else {
            Command::None
        }
    }

    /// Move the response panel one line. A selected token stays on screen.
    fn scroll_text(&mut self, down: bool) -> bool {
        let rect = self.layout().response;
        let view = self.inspector.view();
        let before = text_highlight::visible_offset(rect, view, self.text_scroll);
        let requested = if down {
            before + 1
        } else {
            before.saturating_sub(1)
        };
        let after = text_highlight::visible_offset(rect, view, requested);
        self.text_scroll = after;
        after != before
    }

    /// Click inside the entropy chart selects the token under the column.
    fn click(&mut self, x: usize, y: usize) -> bool {
        let area = entropy_chart::bar_area(self.layout().chart);
        if !area.contains(x, y) {
            return false;
        }
        let len = self.inspector.current().map_or(0, |set| set.len());
        match entropy_chart::position_for_column(x - area.x, len, area.width) {
            Some(index) => self.inspector.select_by_position(index),
            None => false,
        }
    }

    pub fn render(&mut self) -> RenderFrame {
        let size = FrameSize {
            width: self.width.max(1),
            height: self.height.max(1),
        };
        let mut frame = RenderFrame::new(size, self.theme);
        if self.quitting {
            return frame;
        }
        let layout = InspectLayout::for_size(size.width, size.height);
        let header = self.header_text();
        let footer = self.status.clone().unwrap_or_else(|| KEY_HINTS.to_owned());

        frame.fill_bg(layout.header, frame.token_color(StyleToken::Surface));
        frame.draw_text_in_rect(layout.header, 1, 0, &header, TextRole::Accent);

        let view = self.inspector.view();
        self.text_scroll =
            text_highlight::render(&mut frame, layout.response, view, self.text_scroll);
        entropy_chart::render(&mut frame, layout.chart, view);
        metrics_panel::render(&mut frame, layout.summary, view);
        distribution_chart::render(&mut frame, layout.distribution, view);

        frame.draw_text_in_rect(layout.footer, 1, 0, &footer, TextRole::Muted);
        frame
    }

    fn header_text(&self) -> String {
        format!(
            "wepr  response {}/{}  cursor {}",
            self.loaded,
            self.total,
            self.inspector.cursor()
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{Command, InspectApp, InspectLayout};
    use serde_json::json;
    use wepr_core::{CursorState, ResponsePayload, RiskConfig};
    use wepr_ftui_adapter::input::{
        InputEvent, Key, KeyEvent, Modifiers, MouseEvent, MouseWheelDirection, ResizeEvent,
    };
    use wepr_ftui_adapter::render::Rect;
    use wepr_ftui_adapter::snapshot::assert_frame_contains;
    use wepr_ftui_adapter::style::ThemeSpec;

    fn payload(first: &str) -> ResponsePayload {
        serde_json::from_value(json!({
            "response": format!("{first} sky is"),
            "epr": 0.83,
            "risk_score": 0.33,
            "tokens": [
                {"token": first, "entropy": 0.2, "risk_level": "low"},
                {"token": " sky", "entropy": 1.8, "risk_level": "high",
                 "candidates": [{"token": " sky", "prob": 0.41}, {"token": " sea", "prob": 0.37}]},
                {"token": " is", "entropy": 0.5, "risk_level": "medium"}
            ]
        }))
        .expect("payload")
    }

    fn app() -> InspectApp {
        let mut app = InspectApp::new(RiskConfig::default(), ThemeSpec::default());
        app.enqueue(vec![payload("The"), payload("A")]);
        app
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(key))
    }

    #[test]
    fn layout_partitions_screen() {
        let layout = InspectLayout::for_size(100, 30);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.y, 29);
        assert_eq!(layout.response.width, 60);
        assert_eq!(layout.response.height + layout.chart.height, 28);
        assert_eq!(
            layout.summary,
            Rect {
                x: 60,
                y: 1,
                width: 40,
                height: 8
            }
        );
        assert_eq!(layout.distribution.y, 9);
    }

    #[test]
    fn arrows_walk_the_cursor() {
        let mut app = app();
        assert_eq!(app.update(key(Key::Right)), Command::Redraw);
        assert_eq!(app.inspector().cursor(), CursorState::At(0));
        app.update(key(Key::Right));
        app.update(key(Key::Char('h')));
        assert_eq!(app.inspector().cursor(), CursorState::At(0));
        assert_eq!(app.update(key(Key::Left)), Command::None);
        app.update(key(Key::Escape));
        assert_eq!(app.inspector().cursor(), CursorState::None);
        app.update(key(Key::Left));
        assert_eq!(app.inspector().cursor(), CursorState::At(2));
    }

    #[test]
    fn home_and_end_jump() {
        let mut app = app();
        app.update(key(Key::End));
        assert_eq!(app.inspector().cursor(), CursorState::At(2));
        app.update(key(Key::Home));
        assert_eq!(app.inspector().cursor(), CursorState::At(0));
    }

    #[test]
    fn next_response_resets_cursor() {
        let mut app = app();
        app.update(key(Key::Right));
        let before = app.inspector().generation();
        app.update(key(Key::Char('n')));
        assert_eq!(app.inspector().generation(), before + 1);
        assert_eq!(app.inspector().cursor(), CursorState::None);

        app.update(key(Key::Char('n')));
        assert_eq!(app.status(), Some("No more responses queued"));
    }

    #[test]
    fn click_in_chart_selects_token() {
        let mut app = app();
        let area = super::entropy_chart::bar_area(app.layout().chart);
        let slot = area.width / 3;
        app.update(InputEvent::Mouse(MouseEvent::click(area.x + slot + 1, area.y)));
        assert_eq!(app.inspector().cursor(), CursorState::At(1));

        let outside = app.update(InputEvent::Mouse(MouseEvent::click(0, 0)));
        assert_eq!(outside, Command::None);
        assert_eq!(app.inspector().cursor(), CursorState::At(1));
    }

    #[test]
    fn click_without_data_is_ignored() {
        let mut app = InspectApp::new(RiskConfig::default(), ThemeSpec::default());
        let area = super::entropy_chart::bar_area(app.layout().chart);
        app.update(InputEvent::Mouse(MouseEvent::click(area.x, area.y)));
        assert_eq!(app.inspector().cursor(), CursorState::None);
    }

    fn long_payload(count: usize) -> ResponsePayload {
        let tokens: Vec<_> = (0..count)
            .map(|n| json!({"token": format!(" w{n}"), "entropy": 0.3}))
            .collect();
        let text: String = (0..count).map(|n| format!(" w{n}")).collect();
        serde_json::from_value(json!({"response": text, "epr": 0.3, "tokens": tokens}))
            .expect("payload")
    }

    #[test]
    fn scroll_keys_reveal_the_rest_of_a_long_response() {
        let mut app = InspectApp::new(RiskConfig::default(), ThemeSpec::default());
        app.enqueue(vec![long_payload(400), payload("The")]);
        assert!(!app.render().snapshot().contains(" w399"));
        assert_eq!(app.update(key(Key::Up)), Command::None);

        assert_eq!(app.update(key(Key::Down)), Command::Redraw);
        assert_eq!(app.update(key(Key::Char('j'))), Command::Redraw);
        assert_eq!(app.text_scroll(), 2);
        let wheel_down = InputEvent::Mouse(MouseEvent {
            wheel: Some(MouseWheelDirection::Down),
            click: None,
        });
        let mut steps = 0;
        while app.update(wheel_down) == Command::Redraw {
            steps += 1;
            assert!(steps < 400, "scrolling never reached the end");
        }
        assert!(app.render().snapshot().contains(" w399"));

        assert_eq!(app.update(key(Key::Char('k'))), Command::Redraw);
        assert_eq!(app.update(key(Key::Char('n'))), Command::Redraw);
        assert_eq!(app.text_scroll(), 0);
    }

    #[test]
    fn scrolling_keeps_the_selected_token_visible() {
        let mut app = InspectApp::new(RiskConfig::default(), ThemeSpec::default());
        app.enqueue(vec![long_payload(400)]);
        app.update(key(Key::Home));
        assert_eq!(app.update(key(Key::Down)), Command::None);
        assert_eq!(app.text_scroll(), 0);

        app.update(key(Key::End));
        assert!(app.render().snapshot().contains(" w399"));
        assert!(app.text_scroll() > 0);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert_eq!(app.update(key(Key::Char('q'))), Command::Quit);
        assert!(app.quitting());

        let mut app = self::app();
        let ctrl_c = InputEvent::Key(KeyEvent {
            key: Key::Char('c'),
            modifiers: Modifiers::ctrl(),
        });
        assert_eq!(app.update(ctrl_c), Command::Quit);
    }

    #[test]
    fn resize_relayouts() {
        let mut app = app();
        app.update(InputEvent::Resize(ResizeEvent {
            width: 80,
            height: 24,
        }));
        let frame = app.render();
        assert_eq!(frame.size().width, 80);
        assert_eq!(frame.size().height, 24);
    }

    #[test]
    fn render_shows_every_surface() {
        let mut app = app();
        app.update(key(Key::Right));
        app.update(key(Key::Right));
        let frame = app.render();
        assert_frame_contains("app", &frame, "wepr  response 1/2  cursor at(1)");
        assert_frame_contains("app", &frame, "Running EPR (Token 2/3)");
        assert_frame_contains("app", &frame, "Distribution: \" sky\"");
        assert_frame_contains("app", &frame, "Entropy Flow");
        assert_frame_contains("app", &frame, "The sky is");
        assert_frame_contains("app", &frame, "esc reset");
    }

    #[test]
    fn empty_app_renders_placeholders() {
        let mut app = InspectApp::new(RiskConfig::default(), ThemeSpec::default());
        let frame = app.render();
        assert_frame_contains("empty", &frame, "Start a conversation");
        assert_frame_contains("empty", &frame, "Select a token");
    }
}
