//! Single-select prompt entry points.

use std::io::{self, Read, Write};

use bon::Builder;
use log::{debug, info};

use super::{
    PromptError, TerminalSession,
    input::InputDecoder,
    render::Renderer,
    state::{Phase, SelectionState},
};

/// What to show the user.
///
/// # Example
///
/// ```
/// use dilemma::tui::PromptConfig;
///
/// let config = PromptConfig::builder()
///     .title("Select a treat using the arrow keys:")
///     .options(vec!["waffles".into(), "candy".into()])
///     .help("Use arrow up and down, then enter to select.")
///     .build();
/// assert_eq!(config.occupied_lines(false), 4);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct PromptConfig {
    /// Printed above the options. May span several lines.
    #[builder(into)]
    pub title: String,
    /// The choices, in display order. Must not be empty.
    pub options: Vec<String>,
    /// Printed below the options after an unrecognized key.
    #[builder(into, default)]
    pub help: String,
    /// Draw at most this many options at a time.
    pub visible_rows: Option<usize>,
}

/// How a prompt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user confirmed the option at `index`.
    Selected { index: usize, option: String },
    /// The user pressed Ctrl+C.
    Interrupted,
}

impl PromptOutcome {
    /// Returns the confirmed option, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Selected { option, .. } => Some(option),
            Self::Interrupted => None,
        }
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

/// Asks the user to pick one of `config.options` on the controlling terminal.
///
/// Returns once the user confirms a choice or presses Ctrl+C. The terminal is
/// switched back out of raw mode and the cursor shown again on every path.
///
/// # Errors
///
/// - [`PromptError::NoOptions`] if there is nothing to choose from
/// - [`PromptError::TerminalUnavailable`] if stdin is not a terminal
/// - [`PromptError::InputStreamFailure`] if reading keys fails
/// - [`PromptError::OutputFailure`] if writing to the terminal fails
pub fn prompt(config: &PromptConfig) -> Result<PromptOutcome, PromptError> {
    if config.options.is_empty() {
        return Err(PromptError::NoOptions);
    }

    let mut session = TerminalSession::begin()?;
    let outcome = run(config, &mut session, io::stdin());
    let ended = session.end();

    let outcome = outcome?;
    ended.map_err(PromptError::OutputFailure)?;
    Ok(outcome)
}

/// Runs a prompt over an existing session, reading raw key bytes from `input`.
///
/// `input` is read on a background thread that is joined before this
/// returns. Releasing the session is left to the caller.
pub fn run<W, R>(
    config: &PromptConfig,
    session: &mut TerminalSession<W>,
    input: R,
) -> Result<PromptOutcome, PromptError>
where
    W: Write,
    R: Read + Send + 'static,
{
    if config.options.is_empty() {
        return Err(PromptError::NoOptions);
    }

    debug!("prompt started with {} options", config.options.len());

    session.hide_cursor().map_err(PromptError::OutputFailure)?;

    let mut state = SelectionState::new(config.options.len());
    let mut screen = Renderer::new(session, config);
    screen
        .draw(&mut state, false)
        .map_err(PromptError::OutputFailure)?;

    let decoder = InputDecoder::spawn(input).map_err(PromptError::InputStreamFailure)?;
    let result = interact(config, &mut screen, &mut state, &decoder);
    decoder.shutdown();

    // Whatever the caller prints next must start at column zero.
    let returned = screen
        .session()
        .carriage_return()
        .and_then(|()| screen.session().flush());

    match &result {
        Ok(PromptOutcome::Selected { index, option }) => {
            info!("selected option {index}: {option}");
        }
        Ok(PromptOutcome::Interrupted) => info!("prompt interrupted"),
        Err(e) => info!("prompt failed: {e}"),
    }

    let outcome = result?;
    returned.map_err(PromptError::OutputFailure)?;
    Ok(outcome)
}

fn interact<W: Write>(
    config: &PromptConfig,
    screen: &mut Renderer<'_, W>,
    state: &mut SelectionState,
    decoder: &InputDecoder,
) -> Result<PromptOutcome, PromptError> {
    loop {
        let event = match decoder.next() {
            Ok(event) => event,
            Err(e) => {
                // Clear any visible help before giving up; the read error wins.
                let _ = screen.redraw(state, false);
                return Err(PromptError::InputStreamFailure(e));
            }
        };
        debug!("key event: {event}");

        let phase = state.apply(event);
        screen
            .redraw(state, event.shows_help())
            .map_err(PromptError::OutputFailure)?;

        match phase {
            Phase::Active => decoder.resume().map_err(PromptError::InputStreamFailure)?,
            Phase::Confirmed => {
                let index = state.highlight();
                let option = config
                    .options
                    .get(index)
                    .cloned()
                    .ok_or(PromptError::NoOptions)?;
                return Ok(PromptOutcome::Selected { index, option });
            }
            Phase::Interrupted => return Ok(PromptOutcome::Interrupted),
        }
    }
}
