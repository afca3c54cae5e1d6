//! Kuwo catalog client.

use melodeck_core::{HttpConfig, KuwoConfig, Lyrics, Track, TrackSource};
use melodeck_http::header::{HeaderValue, CONTENT_TYPE};
use melodeck_http::{CancelSignal, ClientOptions, HttpClient, RequestConfig, Transport};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{KuwoError, Result};

/// Envelope wrapping every catalog response
#[derive(Debug, Deserialize)]
struct KuwoResponse<T> {
    code: i64,
    data: Option<T>,
}

impl<T> KuwoResponse<T> {
    fn into_data(self) -> Result<T> {
        if self.code != 200 {
            return Err(KuwoError::Api { code: self.code });
        }
        self.data.ok_or(KuwoError::MissingData)
    }
}

/// Lyrics endpoint payload; `lrclist` holds LRC text
#[derive(Debug, Deserialize)]
struct LyricsPayload {
    lrclist: String,
}

/// A song returned by catalog search
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KuwoSong {
    #[serde(deserialize_with = "string_or_number")]
    pub rid: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    /// Cover image URL
    #[serde(default)]
    pub pic: String,
    /// Lyrics URL
    #[serde(default)]
    pub lrc: String,
    /// Stream URL
    #[serde(default)]
    pub url: String,
}

impl KuwoSong {
    /// Convert into a playable [`Track`]
    #[must_use]
    pub fn into_track(self) -> Track {
        Track {
            title: self.name,
            artist: Some(self.artist).filter(|artist| !artist.is_empty()),
            album: None,
            source: TrackSource::Kuwo {
                rid: self.rid,
                lyrics_url: self.lrc,
                stream_url: self.url,
                cover_url: Some(self.pic).filter(|pic| !pic.is_empty()),
            },
        }
    }
}

/// Song ids come back as either strings or numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

fn http_options(config: &HttpConfig) -> ClientOptions {
    ClientOptions::default()
        .timeout(config.timeout())
        .retry(config.retry)
        .retry_delay(config.retry_delay())
}

fn kuwo_options(config: &KuwoConfig) -> ClientOptions {
    ClientOptions::default()
        .base_url(config.base_url.as_str())
        .timeout(config.timeout())
        .retry(config.retry)
}

/// Client for the Kuwo search and lyrics endpoints
pub struct KuwoClient {
    http: HttpClient,
}

impl KuwoClient {
    /// Create a client from the `[http]` defaults overlaid with the `[kuwo]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(http: &HttpConfig, kuwo: &KuwoConfig) -> Result<Self> {
        Ok(Self::from_http(HttpClient::new(http_options(http))?, kuwo))
    }

    /// Create a client sending requests through a custom [`Transport`]
    #[must_use]
    pub fn with_transport(
        http: &HttpConfig,
        kuwo: &KuwoConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::from_http(
            HttpClient::with_transport(http_options(http), transport),
            kuwo,
        )
    }

    fn from_http(http: HttpClient, kuwo: &KuwoConfig) -> Self {
        http.set_defaults(kuwo_options(kuwo));

        // Kept for the client's whole lifetime
        let _ = http.add_request_interceptor(|mut config: RequestConfig| async move {
            config
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            config
        });

        Self { http }
    }

    /// Underlying HTTP client, e.g. for adding interceptors
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Search the catalog by keyword.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the body does not decode or the
    /// API reports a non-200 code.
    pub async fn search_songs(
        &self,
        keyword: &str,
        signal: Option<CancelSignal>,
    ) -> Result<Vec<KuwoSong>> {
        info!("Searching Kuwo for: {}", keyword);

        let mut request = RequestConfig::new("").param("name", keyword);
        if let Some(signal) = signal {
            request = request.signal(signal);
        }

        let response = self.http.get(request).await?;
        let songs = response
            .json::<KuwoResponse<Vec<KuwoSong>>>()?
            .into_data()?;

        info!("Kuwo returned {} songs for: {}", songs.len(), keyword);
        Ok(songs)
    }

    /// Download and parse the lyrics behind a song's `lrc` URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a
    /// successful lyrics envelope.
    pub async fn fetch_lyrics(&self, lyrics_url: &str) -> Result<Lyrics> {
        debug!("Fetching Kuwo lyrics: {}", lyrics_url);

        let response = self.http.get(lyrics_url).await?;
        let payload = response.json::<KuwoResponse<LyricsPayload>>()?.into_data()?;

        Ok(Lyrics::parse(&payload.lrclist))
    }
}
