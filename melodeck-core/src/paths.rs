//! Path constants for configuration and log files.

use std::path::{Path, PathBuf};

/// The name of the configuration directory under ~/.config/
pub const CONFIG_DIR_NAME: &str = "melodeck";

/// The name of the main configuration file
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// The name of the log file written when file logging is enabled
pub const LOG_FILE_NAME: &str = "melodeck.log";

/// Extension of lyric files stored next to audio files
pub const LYRICS_FILE_EXTENSION: &str = "lrc";

/// Get the configuration directory path (~/.config/melodeck/)
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(CONFIG_DIR_NAME)
}

/// Get the config file path (~/.config/melodeck/config.toml)
#[must_use]
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Get the log file path (~/.config/melodeck/melodeck.log)
#[must_use]
pub fn log_file_path() -> PathBuf {
    config_dir().join(LOG_FILE_NAME)
}

/// Path of the `.lrc` file that accompanies an audio file
///
/// `music/song.mp3` becomes `music/song.lrc`; a path without an extension
/// gets `.lrc` appended.
#[must_use]
pub fn lyrics_path_for(track_path: &Path) -> PathBuf {
    track_path.with_extension(LYRICS_FILE_EXTENSION)
}
