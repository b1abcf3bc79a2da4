//! Directory where the executable lives. Preferences are stored next to the
//! app so a standalone copy carries its own settings.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Directory holding the bundled sample images.
pub fn assets_directory() -> PathBuf {
    exe_directory().join("assets").join("img")
}
