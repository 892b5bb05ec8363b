//! Selection state and the interaction state machine.

use super::KeyEvent;

/// Where a session stands after consuming a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Active,
    Confirmed,
    Interrupted,
}

/// Mutable state of one prompt, owned by the session loop alone.
#[derive(Debug)]
pub(crate) struct SelectionState {
    highlight: usize,
    option_count: usize,
    /// Whether the help text is on screen right now.
    pub(crate) help_visible: bool,
    /// Terminal lines occupied by the last draw.
    pub(crate) rendered_lines: usize,
}

impl SelectionState {
    pub(crate) fn new(option_count: usize) -> Self {
        debug_assert!(option_count > 0);
        Self {
            highlight: 0,
            option_count,
            help_visible: false,
            rendered_lines: 0,
        }
    }

    pub(crate) fn highlight(&self) -> usize {
        self.highlight
    }

    /// Applies `event` to the highlight and returns the resulting phase.
    ///
    /// Movement wraps at both ends. Rendering is the caller's job.
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn apply(&mut self, event: KeyEvent) -> Phase {
        match event {
            KeyEvent::MoveUp => {
                self.highlight = (self.highlight + self.option_count - 1) % self.option_count;
                Phase::Active
            }
            KeyEvent::MoveDown => {
                self.highlight = (self.highlight + 1) % self.option_count;
                Phase::Active
            }
            KeyEvent::Unrecognized => Phase::Active,
            KeyEvent::Confirm => Phase::Confirmed,
            KeyEvent::Interrupt => Phase::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(state: &mut SelectionState, events: &[KeyEvent]) -> Phase {
        let mut phase = Phase::Active;
        for &event in events {
            phase = state.apply(event);
        }
        phase
    }

    #[test]
    fn test_move_down_n_times_wraps_to_start() {
        for n in 1..=12 {
            for start in 0..n {
                let mut state = SelectionState::new(n);
                apply_all(&mut state, &vec![KeyEvent::MoveDown; start]);
                assert_eq!(state.highlight(), start);

                apply_all(&mut state, &vec![KeyEvent::MoveDown; n]);
                assert_eq!(state.highlight(), start, "n={n} start={start}");
            }
        }
    }

    #[test]
    fn test_move_up_n_times_wraps_to_start() {
        for n in 1..=12 {
            let mut state = SelectionState::new(n);
            apply_all(&mut state, &vec![KeyEvent::MoveUp; n]);
            assert_eq!(state.highlight(), 0, "n={n}");
        }
    }

    #[test]
    fn test_move_up_from_first_wraps_to_last() {
        let mut state = SelectionState::new(4);
        assert_eq!(state.apply(KeyEvent::MoveUp), Phase::Active);
        assert_eq!(state.highlight(), 3);
    }

    #[test]
    fn test_highlight_stays_in_range() {
        let mut state = SelectionState::new(3);
        let events = [
            KeyEvent::MoveUp,
            KeyEvent::MoveUp,
            KeyEvent::MoveDown,
            KeyEvent::MoveUp,
            KeyEvent::MoveUp,
            KeyEvent::MoveUp,
            KeyEvent::MoveDown,
        ];
        for event in events {
            state.apply(event);
            assert!(state.highlight() < 3);
        }
    }

    #[test]
    fn test_single_option_never_moves() {
        let mut state = SelectionState::new(1);
        state.apply(KeyEvent::MoveUp);
        assert_eq!(state.highlight(), 0);
        state.apply(KeyEvent::MoveDown);
        assert_eq!(state.highlight(), 0);
    }

    #[test]
    fn test_terminal_events() {
        let mut state = SelectionState::new(2);
        assert_eq!(state.apply(KeyEvent::Confirm), Phase::Confirmed);
        assert_eq!(state.apply(KeyEvent::Interrupt), Phase::Interrupted);
    }

    #[test]
    fn test_unrecognized_keeps_highlight() {
        let mut state = SelectionState::new(5);
        state.apply(KeyEvent::MoveDown);
        assert_eq!(state.apply(KeyEvent::Unrecognized), Phase::Active);
        assert_eq!(state.highlight(), 1);
    }
}
