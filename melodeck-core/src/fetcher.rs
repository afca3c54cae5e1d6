//! Lyrics fetcher that orchestrates multiple lyrics providers.

use tracing::{info, warn};

use crate::provider::{LyricsProvider, LyricsResult};
use crate::track::Track;

/// Tries each provider in order until one yields timed lyrics
pub struct LyricsFetcher {
    providers: Vec<Box<dyn LyricsProvider>>,
}

impl LyricsFetcher {
    /// Create a new lyrics fetcher
    ///
    /// # Arguments
    /// * `providers` - List of lyrics providers to try in order
    #[must_use]
    pub fn new(providers: Vec<Box<dyn LyricsProvider>>) -> Self {
        Self { providers }
    }

    /// Names of the configured providers, in priority order
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Load lyrics for a track.
    ///
    /// Provider failures are logged and skipped; when nothing usable is found
    /// the result is [`LyricsResult::Unavailable`].
    pub async fn load(&self, track: &Track) -> LyricsResult {
        info!(
            "Fetching lyrics for: {} (source: {}, providers: {:?})",
            track,
            track.source.kind(),
            self.provider_names()
        );

        for provider in self.providers.iter().filter(|p| p.supports(track)) {
            info!("Trying provider: {}", provider.name());
            match provider.fetch(track).await {
                Ok(lyrics) if lyrics.is_empty() => {
                    info!("Provider {} returned no timed lines", provider.name());
                }
                Ok(lyrics) => {
                    info!(
                        "Found synced lyrics from {} ({} lines)",
                        provider.name(),
                        lyrics.lines.len()
                    );
                    return LyricsResult::Synced(lyrics);
                }
                Err(e) => {
                    warn!("Provider {} failed with error: {}", provider.name(), e);
                }
            }
        }

        info!("No synced lyrics found for {}", track);
        LyricsResult::Unavailable
    }
}
