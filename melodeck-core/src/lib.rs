pub mod config;
pub mod error;
pub mod fetcher;
pub mod local;
pub mod lrc;
pub mod paths;
pub mod provider;
pub mod time;
pub mod track;

pub use config::{
    HttpConfig, KuwoConfig, LoggingConfig, LyricsConfig, LyricsProviderType, MelodeckConfig,
};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
pub use error::CoreError;
pub use fetcher::LyricsFetcher;
pub use local::{FsTextReader, LocalLrcProvider, TextReader};
pub use lrc::{locate_current_line, parse_lyrics, LyricLine, Lyrics, LyricsMetadata};
pub use paths::{config_dir, lyrics_path_for, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME};
pub use provider::{LyricsProvider, LyricsResult};
pub use time::{format_timestamp, DurationExt};
pub use track::{is_supported_audio_extension, Track, TrackSource};
