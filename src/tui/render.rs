//! In-place drawing of the option list.
//!
//! A redraw erases exactly the lines the previous draw produced and then
//! paints the new frame over them, so the menu updates in place instead of
//! scrolling the terminal.

use std::{
    io::{self, Write},
    ops::Range,
};

use super::{PromptConfig, TerminalSession, state::SelectionState};

/// Marker line printed below a windowed list.
pub const ELLIPSIS: &str = "...";

impl PromptConfig {
    /// Number of terminal lines one draw occupies.
    ///
    /// With help hidden the cursor still rests on the empty line below the
    /// list, which counts as occupied so the next erase removes it.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn occupied_lines(&self, help_visible: bool) -> usize {
        let window = self.window_size();
        let rows = window.unwrap_or(self.options.len()) + usize::from(window.is_some());
        let tail = if help_visible { line_count(&self.help) } else { 1 };

        line_count(&self.title) + rows + tail
    }

    /// Indices of the options drawn while `highlight` is selected.
    ///
    /// The window stays at the top until the highlight passes its last row,
    /// then follows the highlight down so it is always the bottom visible row.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn visible_range(&self, highlight: usize) -> Range<usize> {
        match self.window_size() {
            None => 0..self.options.len(),
            Some(size) => {
                let start = (highlight + 1).saturating_sub(size);
                start..start + size
            }
        }
    }

    /// Row budget when only part of the list fits, `None` for the full list.
    pub(crate) fn window_size(&self) -> Option<usize> {
        self.visible_rows
            .filter(|&rows| rows > 0 && rows < self.options.len())
    }
}

fn line_count(text: &str) -> usize {
    text.matches('\n').count().saturating_add(1)
}

/// Draws a prompt onto its terminal session.
pub(crate) struct Renderer<'a, W: Write> {
    session: &'a mut TerminalSession<W>,
    config: &'a PromptConfig,
}

impl<'a, W: Write> Renderer<'a, W> {
    pub(crate) fn new(session: &'a mut TerminalSession<W>, config: &'a PromptConfig) -> Self {
        Self { session, config }
    }

    pub(crate) fn session(&mut self) -> &mut TerminalSession<W> {
        self.session
    }

    /// Paints title, options and optionally help, starting at the cursor.
    pub(crate) fn draw(
        &mut self,
        state: &mut SelectionState,
        help_visible: bool,
    ) -> io::Result<()> {
        let highlight = state.highlight();

        self.session.write_line(&self.config.title)?;

        for index in self.config.visible_range(highlight) {
            let Some(option) = self.config.options.get(index) else {
                continue;
            };
            if index == highlight {
                self.session.invert_style()?;
                self.session.write_text(option)?;
                self.session.reset_style()?;
                self.session.write_line("")?;
            } else {
                self.session.write_line(option)?;
            }
        }

        if self.config.window_size().is_some() {
            self.session.write_line(ELLIPSIS)?;
        }

        if help_visible {
            self.session.write_text(&self.config.help)?;
        }

        self.session.flush()?;

        state.help_visible = help_visible;
        state.rendered_lines = self.config.occupied_lines(help_visible);
        Ok(())
    }

    /// Erases the frame currently on screen, leaving the cursor on its first line.
    pub(crate) fn clear(&mut self, state: &SelectionState) -> io::Result<()> {
        let lines = self.config.occupied_lines(state.help_visible);
        debug_assert_eq!(lines, state.rendered_lines);

        // The cursor already sits on the last line.
        for _ in 1..lines {
            self.session.clear_current_line()?;
            self.session.move_cursor_up(1)?;
        }
        Ok(())
    }

    /// Erases what is on screen, then draws with the new help visibility.
    ///
    /// The erase must use the help visibility of the frame being erased, not
    /// the one about to be drawn.
    pub(crate) fn redraw(
        &mut self,
        state: &mut SelectionState,
        help_visible: bool,
    ) -> io::Result<()> {
        self.clear(state)?;
        self.draw(state, help_visible)
    }
}
