//! Platform-specific paths for receiver presets and configuration.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/heterodyne/presets/` (Linux), `~/Library/Application Support/heterodyne/presets/` (macOS), `%APPDATA%\heterodyne\presets\` (Windows)
//! - **User config**: `~/.config/heterodyne/` (Linux), `~/Library/Application Support/heterodyne/` (macOS), `%APPDATA%\heterodyne\` (Windows)
//! - **System presets**: `/usr/share/heterodyne/presets/` (Linux), `/Library/Application Support/heterodyne/presets/` (macOS)
//!
//! # Example
//!
//! ```rust,no_run
//! use heterodyne_config::paths;
//!
//! let presets_dir = paths::user_presets_dir();
//! println!("User presets: {:?}", presets_dir);
//!
//! if let Some(path) = paths::find_preset("ham_2m_calling") {
//!     println!("Found preset at: {:?}", path);
//! }
//! ```

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "heterodyne";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME)
}

/// Returns the system-wide presets directory.
///
/// This directory is typically read-only and contains factory presets.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "windows")]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData"))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME).join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by name.
///
/// Searches in order: the name itself as a path, the user presets
/// directory, then the system presets directory. The name can be an
/// absolute/relative path to a TOML file, or a bare preset name (with or
/// without `.toml`).
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") { name.to_string() } else { format!("{name}.toml") };

    let user_path = user_presets_dir().join(&filename);
    if user_path.is_file() {
        return Some(user_path);
    }

    let system_path = system_presets_dir().join(&filename);
    if system_path.is_file() {
        return Some(system_path);
    }

    None
}

/// Ensure the user presets directory exists, creating it if necessary.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Ensure the user config directory exists, creating it if necessary.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List all preset files in the user presets directory.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List all preset files in the system presets directory.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// List all available presets (user presets first, then system).
///
/// Duplicate names are not filtered; the caller handles precedence.
pub fn list_all_presets() -> Vec<PathBuf> {
    let mut presets = list_user_presets();
    presets.extend(list_system_presets());
    presets
}

fn list_presets_in_dir(dir: &PathBuf) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect()
}

/// Get the preset name from a file path (the file stem).
pub fn preset_name_from_path(path: &std::path::Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(|s| s.to_string())
}
