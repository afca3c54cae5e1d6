//! Track model shared by the player, lyrics providers and the remote catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Audio file extensions the player can open
pub const SUPPORTED_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "ogg", "aac"];

/// Check whether a file extension (without the dot) is a supported audio format
#[must_use]
pub fn is_supported_audio_extension(extension: &str) -> bool {
    SUPPORTED_AUDIO_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Where a track comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum TrackSource {
    /// A file on the local filesystem
    Local { path: PathBuf },
    /// A search result from the Kuwo catalog
    Kuwo {
        rid: String,
        lyrics_url: String,
        stream_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cover_url: Option<String>,
    },
}

impl TrackSource {
    /// Short identifier of the source, used for logging and provider matching
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::Kuwo { .. } => "kuwo",
        }
    }
}

/// A playable track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(flatten)]
    pub source: TrackSource,
}

impl Track {
    /// Create a track backed by a local file, titled after the file stem
    pub fn local(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            title,
            artist: None,
            album: None,
            source: TrackSource::Local { path },
        }
    }

    /// Set artist name
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.artist {
            Some(artist) => write!(f, "{} - {}", artist, self.title),
            None => f.write_str(&self.title),
        }
    }
}
