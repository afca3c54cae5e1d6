use crate::error::CoreError;
use crate::lrc::Lyrics;
use crate::track::Track;
use async_trait::async_trait;

/// Outcome of loading lyrics for a track
#[derive(Debug, Clone, PartialEq)]
pub enum LyricsResult {
    /// Timed lyrics ready for display
    Synced(Lyrics),
    /// No provider produced usable lyrics
    Unavailable,
}

impl LyricsResult {
    /// Check if lyrics were found
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Synced(_))
    }

    /// Get the lyrics if found
    #[must_use]
    pub const fn as_synced(&self) -> Option<&Lyrics> {
        match self {
            Self::Synced(lyrics) => Some(lyrics),
            Self::Unavailable => None,
        }
    }
}

/// Trait for lyrics providers
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Whether this provider can serve lyrics for the track's source
    fn supports(&self, track: &Track) -> bool;

    /// Fetch lyrics for a track
    async fn fetch(&self, track: &Track) -> Result<Lyrics, CoreError>;
}
