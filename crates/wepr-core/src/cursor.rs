//! Selection cursor: which token, if any, is under inspection.
//!
//! The cursor never stores the set length. Every transition takes the length
//! of the active set so a stale cursor can never point past its bounds.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorState {
    #[default]
    None,
    At(usize),
}

impl CursorState {
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::At(index) => Some(index),
        }
    }
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::At(index) => write!(f, "at({index})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    SelectByPosition(usize),
    Next,
    Prev,
    ResetToNone,
}

/// Pure transition function over a set of `len` tokens.
///
/// Out-of-range requests leave the state unchanged.
#[must_use]
pub fn next_state(current: CursorState, event: CursorEvent, len: usize) -> CursorState {
    match event {
        CursorEvent::ResetToNone => CursorState::None,
        CursorEvent::SelectByPosition(index) if index < len => CursorState::At(index),
        CursorEvent::SelectByPosition(_) => current,
        CursorEvent::Next => match current {
            _ if len == 0 => current,
            CursorState::None => CursorState::At(0),
            CursorState::At(index) if index + 1 < len => CursorState::At(index + 1),
            CursorState::At(_) => current,
        },
        CursorEvent::Prev => match current {
            _ if len == 0 => current,
            CursorState::None => CursorState::At(len - 1),
            CursorState::At(index) if index > 0 && index < len => CursorState::At(index - 1),
            CursorState::At(_) => current,
        },
    }
}

/// Apply `event` and report whether the state changed.
#[must_use]
pub fn transition(current: CursorState, event: CursorEvent, len: usize) -> (CursorState, bool) {
    let next = next_state(current, event, len);
    (next, next != current)
}

/// Owned cursor handed to the inspection surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionCursor {
    state: CursorState,
}

impl SelectionCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.state.index()
    }

    pub fn select_by_position(&mut self, index: usize, len: usize) -> bool {
        self.apply(CursorEvent::SelectByPosition(index), len)
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.apply(CursorEvent::Next, len)
    }

    pub fn prev(&mut self, len: usize) -> bool {
        self.apply(CursorEvent::Prev, len)
    }

    pub fn reset_to_none(&mut self) -> bool {
        self.apply(CursorEvent::ResetToNone, 0)
    }

    fn apply(&mut self, event: CursorEvent, len: usize) -> bool {
        let (next, changed) = transition(self.state, event, len);
        if changed {
            tracing::debug!(from = %self.state, to = %next, ?event, len, "cursor moved");
        }
        self.state = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::{next_state, transition, CursorEvent, CursorState, SelectionCursor};

    #[test]
    fn select_within_bounds_moves_cursor() {
        for state in [CursorState::None, CursorState::At(0), CursorState::At(4)] {
            assert_eq!(
                next_state(state, CursorEvent::SelectByPosition(2), 5),
                CursorState::At(2)
            );
        }
    }

    #[test]
    fn select_out_of_range_is_noop() {
        assert_eq!(
            next_state(CursorState::At(1), CursorEvent::SelectByPosition(5), 5),
            CursorState::At(1)
        );
        assert_eq!(
            next_state(CursorState::None, CursorEvent::SelectByPosition(0), 0),
            CursorState::None
        );
    }

    #[test]
    fn next_from_none_enters_at_start() {
        assert_eq!(
            next_state(CursorState::None, CursorEvent::Next, 3),
            CursorState::At(0)
        );
    }

    #[test]
    fn prev_from_none_enters_at_end() {
        assert_eq!(
            next_state(CursorState::None, CursorEvent::Prev, 3),
            CursorState::At(2)
        );
    }

    #[test]
    fn edges_do_not_wrap() {
        let mut state = CursorState::At(2);
        for _ in 0..4 {
            state = next_state(state, CursorEvent::Next, 3);
            assert_eq!(state, CursorState::At(2));
        }
        let mut state = CursorState::At(0);
        for _ in 0..4 {
            state = next_state(state, CursorEvent::Prev, 3);
            assert_eq!(state, CursorState::At(0));
        }
    }

    #[test]
    fn empty_set_ignores_navigation() {
        for event in [
            CursorEvent::Next,
            CursorEvent::Prev,
            CursorEvent::SelectByPosition(0),
        ] {
            assert_eq!(next_state(CursorState::None, event, 0), CursorState::None);
        }
    }

    #[test]
    fn reset_is_unconditional() {
        for state in [CursorState::None, CursorState::At(0), CursorState::At(9)] {
            assert_eq!(
                next_state(state, CursorEvent::ResetToNone, 10),
                CursorState::None
            );
        }
    }

    #[test]
    fn transition_reports_change() {
        assert_eq!(
            transition(CursorState::At(0), CursorEvent::Next, 2),
            (CursorState::At(1), true)
        );
        assert_eq!(
            transition(CursorState::At(1), CursorEvent::Next, 2),
            (CursorState::At(1), false)
        );
    }

    #[test]
    fn owned_cursor_walks_forward_and_back() {
        let mut cursor = SelectionCursor::new();
        assert!(cursor.next(3));
        assert!(cursor.next(3));
        assert_eq!(cursor.index(), Some(1));
        assert!(cursor.prev(3));
        assert_eq!(cursor.index(), Some(0));
        assert!(!cursor.prev(3));
        assert!(cursor.reset_to_none());
        assert_eq!(cursor.state(), CursorState::None);
        assert!(!cursor.reset_to_none());
    }

    #[test]
    fn display_matches_state_names() {
        assert_eq!(CursorState::None.to_string(), "none");
        assert_eq!(CursorState::At(3).to_string(), "at(3)");
    }
}
