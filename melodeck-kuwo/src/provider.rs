use async_trait::async_trait;
use melodeck_core::{CoreError, Lyrics, LyricsProvider, Track, TrackSource};
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::KuwoClient;
use crate::error::KuwoError;

/// Lyrics provider for tracks found through Kuwo search
pub struct KuwoLyricsProvider {
    client: Arc<KuwoClient>,
}

impl KuwoLyricsProvider {
    #[must_use]
    pub const fn new(client: Arc<KuwoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LyricsProvider for KuwoLyricsProvider {
    fn name(&self) -> &'static str {
        "kuwo"
    }

    fn supports(&self, track: &Track) -> bool {
        matches!(track.source, TrackSource::Kuwo { .. })
    }

    async fn fetch(&self, track: &Track) -> Result<Lyrics, CoreError> {
        let TrackSource::Kuwo { lyrics_url, .. } = &track.source else {
            return Err(CoreError::LyricsProviderFailed {
                provider: self.name().to_string(),
                reason: format!("unsupported track source: {}", track.source.kind()),
            });
        };

        if lyrics_url.is_empty() {
            return Err(CoreError::LyricsNotFound {
                track: track.to_string(),
            });
        }

        info!("Fetching lyrics from Kuwo for: {}", track);

        match self.client.fetch_lyrics(lyrics_url).await {
            Ok(lyrics) => Ok(lyrics),
            Err(KuwoError::Api { code }) => {
                info!("Kuwo has no lyrics for {} (code {})", track, code);
                Err(CoreError::LyricsNotFound {
                    track: track.to_string(),
                })
            }
            Err(KuwoError::MissingData) => Err(CoreError::LyricsNotFound {
                track: track.to_string(),
            }),
            Err(e) => {
                warn!("Kuwo lyrics request failed: {}", e);
                Err(CoreError::LyricsProviderFailed {
                    provider: self.name().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
