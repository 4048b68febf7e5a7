//! Platform-specific paths for saved brackets.
//!
//! # Directory Structure
//!
//! - **User brackets**: `~/.config/bracketry/brackets/` (Linux), `~/Library/Application Support/bracketry/brackets/` (macOS), `%APPDATA%\bracketry\brackets\` (Windows)
//! - **User config**: `~/.config/bracketry/` (Linux), `~/Library/Application Support/bracketry/` (macOS), `%APPDATA%\bracketry\` (Windows)
//!
//! # Example
//!
//! ```rust,no_run
//! use bracketry_config::paths;
//!
//! // Find a bracket by name (path first, then the user directory)
//! if let Some(path) = paths::find_bracket("spring_open") {
//!     println!("Found bracket at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::bracket_file::FileFormat;

/// Application name used for directory paths.
const APP_NAME: &str = "bracketry";

/// Subdirectory name for saved brackets.
const BRACKETS_SUBDIR: &str = "brackets";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific brackets directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/bracketry/brackets/`
/// - macOS: `~/Library/Application Support/bracketry/brackets/`
/// - Windows: `%APPDATA%\bracketry\brackets\`
pub fn user_brackets_dir() -> PathBuf {
    user_config_dir().join(BRACKETS_SUBDIR)
}

/// Find a bracket file by name.
///
/// The name can be a path to an existing file, or a bracket name looked up
/// in the user brackets directory with a `.toml` then `.json` extension.
pub fn find_bracket(name: &str) -> Option<PathBuf> {
    find_bracket_in(name, &user_brackets_dir())
}

fn find_bracket_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    if FileFormat::from_path(&path).is_some() {
        let candidate = dir.join(name);
        return candidate.is_file().then_some(candidate);
    }

    [FileFormat::Toml, FileFormat::Json]
        .into_iter()
        .map(|format| dir.join(format!("{name}.{}", format.extension())))
        .find(|candidate| candidate.is_file())
}

/// Ensure the user brackets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_brackets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_brackets_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// List all bracket files in the user brackets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_brackets() -> Vec<PathBuf> {
    list_brackets_in_dir(&user_brackets_dir())
}

/// List `.toml` and `.json` files in a directory, sorted by path.
pub fn list_brackets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && FileFormat::from_path(path).is_some())
        .collect();
    found.sort();
    found
}

/// Get the bracket name from a file path.
///
/// ```rust
/// use bracketry_config::paths::bracket_name_from_path;
/// use std::path::Path;
///
/// let name = bracket_name_from_path(Path::new("/path/to/spring_open.toml"));
/// assert_eq!(name, Some("spring_open".to_string()));
/// ```
pub fn bracket_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}
