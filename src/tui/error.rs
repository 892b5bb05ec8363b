//! Errors surfaced by a prompt session.

use std::io;

use derive_more::{Display, Error};

/// Fatal conditions of a single prompt invocation.
///
/// None of these are retried: each one means the interactive precondition
/// itself is broken. The terminal is always released before one is returned.
#[derive(Debug, Display, Error)]
pub enum PromptError {
    /// Not attached to an interactive terminal, or raw mode was refused.
    #[display("terminal unavailable: {_0}")]
    TerminalUnavailable(io::Error),
    /// Reading key input failed or the input stream was closed.
    #[display("input stream failure: {_0}")]
    InputStreamFailure(io::Error),
    /// Writing to the terminal failed.
    #[display("terminal output failure: {_0}")]
    OutputFailure(io::Error),
    /// The prompt was given nothing to choose from.
    #[display("prompt has no options to choose from")]
    NoOptions,
}

impl PromptError {
    /// Returns true if the user could not have been shown the prompt at all.
    #[must_use]
    pub fn is_terminal_unavailable(&self) -> bool {
        matches!(self, Self::TerminalUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_source() {
        let err = PromptError::InputStreamFailure(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input stream closed",
        ));
        assert_eq!(err.to_string(), "input stream failure: input stream closed");
    }

    #[test]
    fn test_no_options_display() {
        assert_eq!(
            PromptError::NoOptions.to_string(),
            "prompt has no options to choose from"
        );
    }

    #[test]
    fn test_is_terminal_unavailable() {
        let err = PromptError::TerminalUnavailable(io::Error::other("not a tty"));
        assert!(err.is_terminal_unavailable());
        assert!(!PromptError::NoOptions.is_terminal_unavailable());
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = PromptError::NoOptions.into();
        assert!(err.downcast_ref::<PromptError>().is_some());
    }
}
