mod menu;
pub use menu::{DEFAULT_HELP, DEFAULT_TITLE, MenuFile};
