//! Lyrics stored as `.lrc` files next to local audio files.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::error::CoreError;
use crate::lrc::Lyrics;
use crate::paths::lyrics_path_for;
use crate::provider::LyricsProvider;
use crate::track::{Track, TrackSource};

/// Capability to read a text file, provided by the host environment
#[async_trait]
pub trait TextReader: Send + Sync {
    /// Read the whole file at `path` as UTF-8 text
    async fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// [`TextReader`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTextReader;

#[async_trait]
impl TextReader for FsTextReader {
    async fn read_text(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Loads the `.lrc` file sitting next to a local track
pub struct LocalLrcProvider<R = FsTextReader> {
    reader: R,
}

impl LocalLrcProvider {
    /// Create a provider reading from the local filesystem
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reader: FsTextReader,
        }
    }
}

impl Default for LocalLrcProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TextReader> LocalLrcProvider<R> {
    /// Create a provider reading through a custom [`TextReader`]
    pub const fn with_reader(reader: R) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl<R: TextReader> LyricsProvider for LocalLrcProvider<R> {
    fn name(&self) -> &'static str {
        "local"
    }

    fn supports(&self, track: &Track) -> bool {
        matches!(track.source, TrackSource::Local { .. })
    }

    async fn fetch(&self, track: &Track) -> Result<Lyrics, CoreError> {
        let TrackSource::Local { path } = &track.source else {
            return Err(CoreError::LyricsProviderFailed {
                provider: self.name().to_string(),
                reason: format!("unsupported track source: {}", track.source.kind()),
            });
        };

        let lyrics_path = lyrics_path_for(path);
        debug!("Reading lyrics file {}", lyrics_path.display());

        let content = self.reader.read_text(&lyrics_path).await.map_err(|e| {
            debug!("Could not read {}: {}", lyrics_path.display(), e);
            CoreError::LyricsNotFound {
                track: track.to_string(),
            }
        })?;

        Ok(Lyrics::parse(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MapReader(HashMap<PathBuf, String>);

    #[async_trait]
    impl TextReader for MapReader {
        async fn read_text(&self, path: &Path) -> io::Result<String> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn provider_with(files: &[(&str, &str)]) -> LocalLrcProvider<MapReader> {
        let files = files
            .iter()
            .map(|(path, content)| (PathBuf::from(path), (*content).to_string()))
            .collect();
        LocalLrcProvider::with_reader(MapReader(files))
    }

    #[tokio::test]
    async fn test_reads_sibling_lrc() {
        let provider = provider_with(&[("music/song.lrc", "[00:01.00]Hello")]);
        let lyrics = provider.fetch(&Track::local("music/song.mp3")).await.unwrap();
        assert_eq!(lyrics.lines.len(), 1);
        assert_eq!(lyrics.lines[0].text, "Hello");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let provider = provider_with(&[]);
        let err = provider
            .fetch(&Track::local("music/song.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::LyricsNotFound { .. }));
    }

    #[test]
    fn test_supports_only_local_tracks() {
        let provider = LocalLrcProvider::new();
        assert!(provider.supports(&Track::local("a.mp3")));

        let remote = Track {
            source: TrackSource::Kuwo {
                rid: "1".into(),
                lyrics_url: String::new(),
                stream_url: String::new(),
                cover_url: None,
            },
            ..Track::local("a.mp3")
        };
        assert!(!provider.supports(&remote));
    }

    #[tokio::test]
    async fn test_fs_reader() {
        let dir = std::env::temp_dir().join(format!("melodeck-lrc-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("track.lrc"), "[ti:Title]\n[00:02.00]Line")
            .await
            .unwrap();

        let lyrics = LocalLrcProvider::new()
            .fetch(&Track::local(dir.join("track.flac")))
            .await
            .unwrap();
        assert_eq!(lyrics.metadata.title.as_deref(), Some("Title"));
        assert_eq!(lyrics.lines[0].start_time(), std::time::Duration::from_secs(2));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
