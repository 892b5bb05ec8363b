use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::project_data_dir;

/// Logger setup for the command-line front end.
///
/// Anything written to the terminal while a prompt is on screen would break
/// the in-place redraw, so logs go to a file unless none is configured.
#[derive(Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: None,
            debug_mode: false,
        }
    }

    /// Log to `file_name` inside the project data directory.
    /// An absolute path is used as is.
    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Enable debug level logging, including every key event.
    ///
    /// Parameters:
    ///   - enable: true to enable debug mode
    ///
    /// Returns: Self for chaining
    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();

        if self.debug_mode {
            b.filter_level(LevelFilter::Debug);
        } else {
            b.filter_level(LevelFilter::Info);
        }

        if let Some(file_name) = &self.file_name {
            let log_file = get_log_file_path(file_name)?;

            let fd = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_file)
                .with_context(|| format!("Unable to open {} for writing", log_file.display()))?;

            b.target(Target::Pipe(Box::new(fd)));
        }

        b.try_init().context("Logger already initialized")?;

        Ok(())
    }
}

/// Get the path to the log file.
///
/// Parameters:
///   - `file_name`: Log file name, or an absolute path
///
/// Returns: Full path to the log file
fn get_log_file_path(file_name: &Path) -> Result<PathBuf> {
    if file_name.is_absolute() {
        return Ok(file_name.to_path_buf());
    }

    Ok(project_data_dir()?.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_default_debug_mode_disabled() {
        let logging = Logging::new();
        assert!(!logging.debug_mode, "Debug mode should be disabled by default");
        assert!(logging.file_name.is_none());
    }

    #[test]
    fn test_logging_with_debug_mode_toggles() {
        let logging = Logging::new().with_debug_mode(true);
        assert!(logging.debug_mode);

        let logging = logging.with_debug_mode(false);
        assert!(!logging.debug_mode);
    }

    #[test]
    fn test_logging_builder_chaining() {
        let logging = Logging::new().with_file("app.log").with_debug_mode(true);

        assert!(logging.debug_mode);
        assert_eq!(logging.file_name.unwrap().to_string_lossy(), "app.log");
    }

    #[test]
    fn test_get_log_file_path_keeps_absolute_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let absolute = temp_dir.path().join("prompt.log");

        assert_eq!(get_log_file_path(&absolute).unwrap(), absolute);
    }

    #[test]
    fn test_get_log_file_path_preserves_filename() {
        let path = get_log_file_path(Path::new("my-custom-log.log")).unwrap();

        assert!(
            path.file_name()
                .is_some_and(|f| f.to_string_lossy() == "my-custom-log.log"),
            "Filename should be preserved: {}",
            path.display()
        );
    }
}
