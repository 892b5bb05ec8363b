//! Terminal session with RAII setup/teardown.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveUp, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use log::warn;

use super::PromptError;

/// Exclusive control of a terminal for the duration of one prompt.
///
/// Every primitive writes control sequences to the session's sink; nothing is
/// ever read back from the terminal. The prior terminal state (raw mode and
/// cursor visibility) is restored exactly once, either through [`end`] or,
/// failing that, on drop.
///
/// [`end`]: TerminalSession::end
pub struct TerminalSession<W: Write> {
    out: W,
    raw_mode: bool,
    cursor_hidden: bool,
    ended: bool,
}

impl TerminalSession<Stdout> {
    /// Switches the controlling terminal to raw mode and binds stdout.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::TerminalUnavailable`] if stdin is not an
    /// interactive terminal or the OS rejects the mode switch.
    pub fn begin() -> Result<Self, PromptError> {
        if !io::stdin().is_terminal() {
            return Err(PromptError::TerminalUnavailable(io::Error::other(
                "stdin is not an interactive terminal",
            )));
        }

        enable_raw_mode().map_err(PromptError::TerminalUnavailable)?;

        Ok(Self {
            out: io::stdout(),
            raw_mode: true,
            cursor_hidden: false,
            ended: false,
        })
    }
}

impl<W: Write> TerminalSession<W> {
    /// Binds an arbitrary output sink without touching terminal modes.
    pub fn detached(out: W) -> Self {
        Self {
            out,
            raw_mode: false,
            cursor_hidden: false,
            ended: false,
        }
    }

    /// Returns true if this session switched the terminal into raw mode.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.raw_mode
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)?;
        self.cursor_hidden = true;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)?;
        self.cursor_hidden = false;
        Ok(())
    }

    /// Starts reverse-video rendering.
    pub fn invert_style(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reverse))
    }

    pub fn reset_style(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))
    }

    pub fn move_cursor_up(&mut self, lines: u16) -> io::Result<()> {
        queue!(self.out, MoveUp(lines))
    }

    /// Erases the current line and returns to column zero.
    pub fn clear_current_line(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::CurrentLine), Print('\r'))
    }

    pub fn carriage_return(&mut self) -> io::Result<()> {
        queue!(self.out, Print('\r'))
    }

    /// Writes `text` without a trailing newline.
    ///
    /// Raw mode does not return the carriage on newline, so every embedded
    /// newline is followed by a carriage return.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            queue!(self.out, Print(first))?;
        }
        for line in lines {
            queue!(self.out, Print("\n\r"), Print(line))?;
        }
        Ok(())
    }

    /// Writes `text` followed by a newline and a carriage return.
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write_text(text)?;
        queue!(self.out, Print("\n\r"))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Restores the terminal and reports any failure doing so.
    pub fn end(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.ended {
            return Ok(());
        }
        self.ended = true;

        let shown = if self.cursor_hidden {
            self.show_cursor().and_then(|()| self.out.flush())
        } else {
            self.out.flush()
        };

        let left_raw = if self.raw_mode {
            self.raw_mode = false;
            disable_raw_mode()
        } else {
            Ok(())
        };

        shown.and(left_raw)
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("unable to restore terminal: {e}");
        }
    }
}
