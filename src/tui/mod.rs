//! Interactive single-select prompt for character terminals.
//!
//! This module provides the prompt engine and the pieces it is built from:
//! - `TerminalSession` - raw mode and cursor control with guaranteed release
//! - `KeyEvent` - classification of raw key input
//! - `prompt` / `run` - the interactive session itself

mod error;
mod input;
mod prompt;
mod render;
mod session;
mod state;


pub use error::PromptError;
pub use input::KeyEvent;
pub use prompt::{PromptConfig, PromptOutcome, prompt, run};
pub use render::ELLIPSIS;
pub use session::TerminalSession;
