use std::{fs, path::PathBuf};

use anyhow::{Context, Result, anyhow};
#[cfg(unix)]
use log::debug;

pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");
pub const PROJECT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the project data directory, creating it with secure permissions if needed.
///
/// Parameters: None
///
/// Returns: Path to `~/.local/share/dilemma` (or equivalent)
pub fn project_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("Unable to determine data directory. Ensure XDG_DATA_HOME or HOME environment variable is set"))?;

    let project_data_dir = data_dir.join(PROJECT_NAME);
    create_secure_directory(&project_data_dir)?;

    Ok(project_data_dir)
}

/// Creates a directory with owner-only (0700) permissions, fixing them if
/// the directory already exists.
///
/// Parameters:
///   - `dir`: Path to the directory to create/secure
///
/// Returns: `Ok(())` on success, Err on I/O failure
#[cfg(unix)]
fn create_secure_directory(dir: &std::path::Path) -> Result<()> {
    use std::fs::DirBuilder;
    use std::os::unix::fs::DirBuilderExt;
    use std::os::unix::fs::PermissionsExt;

    let mut builder = DirBuilder::new();
    builder.recursive(true).mode(0o700);
    builder
        .create(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;

    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
        .with_context(|| format!("Unable to set permissions on directory: {}", dir.display()))?;

    debug!("Directory secured with 0700 permissions: {}", dir.display());
    Ok(())
}

#[cfg(not(unix))]
fn create_secure_directory(dir: &std::path::Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;
    Ok(())
}
