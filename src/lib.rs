//! Keyboard-driven single-select prompt for character terminals.
//!
//! ```no_run
//! use dilemma::tui::{PromptConfig, PromptOutcome, prompt};
//!
//! let config = PromptConfig::builder()
//!     .title("Select a companion using the arrow keys:")
//!     .options(vec!["dog".into(), "pony".into(), "cat".into()])
//!     .help("Use arrow up and down, then enter to select.")
//!     .build();
//!
//! match prompt(&config)? {
//!     PromptOutcome::Selected { option, .. } => println!("Enjoy your {option}!"),
//!     PromptOutcome::Interrupted => println!("Exiting..."),
//! }
//! # Ok::<(), dilemma::tui::PromptError>(())
//! ```

mod common;
pub mod config;
mod logging;
pub mod tui;

pub use common::{PROJECT_NAME, PROJECT_VERSION};
pub use logging::Logging;
pub use tui::{PromptConfig, PromptError, PromptOutcome, prompt};
