use futures::future::join_all;
use melodeck_core::config::LyricsProviderType;
use melodeck_core::{
    format_timestamp, is_supported_audio_extension, LocalLrcProvider, LyricLine, Lyrics,
    LyricsFetcher, LyricsProvider, LyricsResult, MelodeckConfig, Track,
};
use melodeck_http::CancelToken;
use melodeck_kuwo::{KuwoClient, KuwoError, KuwoLyricsProvider};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// How often the follow loop samples the playback position
const FOLLOW_TICK: Duration = Duration::from_millis(100);

/// How long the follow loop keeps running after the last line started
const FOLLOW_LINGER_SECS: f64 = 5.0;

/// Build the catalog client if the catalog is enabled
fn create_kuwo_client(config: &MelodeckConfig) -> Option<Arc<KuwoClient>> {
    if !config.kuwo.enabled {
        info!("Kuwo catalog disabled in config");
        return None;
    }

    match KuwoClient::new(&config.http, &config.kuwo) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            error!("Failed to create Kuwo client: {}", e);
            None
        }
    }
}

/// Providers in configured priority order
fn create_providers(
    config: &MelodeckConfig,
    kuwo: Option<&Arc<KuwoClient>>,
) -> Vec<Box<dyn LyricsProvider>> {
    config
        .lyrics
        .providers
        .iter()
        .filter_map(|provider_type| -> Option<Box<dyn LyricsProvider>> {
            match provider_type {
                LyricsProviderType::Local => Some(Box::new(LocalLrcProvider::new())),
                LyricsProviderType::Kuwo => kuwo.map_or_else(
                    || {
                        info!("Skipping Kuwo lyrics provider: catalog not available");
                        None
                    },
                    |client| -> Option<Box<dyn LyricsProvider>> {
                        Some(Box::new(KuwoLyricsProvider::new(Arc::clone(client))))
                    },
                ),
            }
        })
        .collect()
}

/// Render the lines around `position`, marking the current one
pub fn render_window(lyrics: &Lyrics, position: f64, context: usize) -> Vec<String> {
    let current = lyrics.current_line(position);
    lyrics
        .visible_lines(position, context, context)
        .iter()
        .map(|line| {
            let marker = if current.is_some_and(|c| std::ptr::eq(c, line)) {
                '>'
            } else {
                ' '
            };
            format_line(marker, line)
        })
        .collect()
}

fn format_line(marker: char, line: &LyricLine) -> String {
    format!("{marker} [{}] {}", format_timestamp(line.time), line.text)
}

/// `melodeck lyrics`
pub async fn show_lyrics(
    config: &MelodeckConfig,
    path: &Path,
    at: f64,
    follow: bool,
    context: usize,
    shutdown: &CancellationToken,
) -> bool {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(is_supported_audio_extension);
    if !supported {
        warn!("{} is not a supported audio file", path.display());
    }

    let kuwo = create_kuwo_client(config);
    let fetcher = LyricsFetcher::new(create_providers(config, kuwo.as_ref()));
    info!("Lyrics providers: {:?}", fetcher.provider_names());

    let track = Track::local(path);
    let LyricsResult::Synced(lyrics) = fetcher.load(&track).await else {
        println!("No lyrics found for {track}");
        return false;
    };

    if let Some(title) = &lyrics.metadata.title {
        println!("{title}");
    }

    if follow {
        follow_lyrics(&lyrics, at, shutdown).await;
    } else {
        for line in render_window(&lyrics, at, context) {
            println!("{line}");
        }
    }
    true
}

/// Print each line as it becomes current, until the end or Ctrl+C
async fn follow_lyrics(lyrics: &Lyrics, at: f64, shutdown: &CancellationToken) {
    let Some(last) = lyrics.lines.last() else {
        return;
    };
    let end = last.time + FOLLOW_LINGER_SECS;

    let started = Instant::now();
    let mut ticker = interval(FOLLOW_TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut shown = None;

    loop {
        tokio::select! {
            () = shutdown.cancelled() => {
                info!("Stopped following lyrics");
                return;
            }
            _ = ticker.tick() => {}
        }

        let position = at + started.elapsed().as_secs_f64();
        let index = lyrics.current_line_index(position);
        if index != shown {
            if let Some(line) = lyrics.current_line(position) {
                println!("{}", format_line('>', line));
            }
            shown = index;
        }

        if position >= end {
            return;
        }
    }
}

/// `melodeck search`
pub async fn search(
    config: &MelodeckConfig,
    keywords: &[String],
    limit: usize,
    with_lyrics: bool,
    shutdown: CancellationToken,
) -> bool {
    let Some(client) = create_kuwo_client(config) else {
        error!("Search needs the Kuwo catalog; enable it in the [kuwo] config section");
        return false;
    };

    // Ctrl+C aborts the in-flight search
    let cancel = CancelToken::new();
    let signal = cancel.signal();
    let watcher = tokio::spawn(async move {
        shutdown.cancelled().await;
        cancel.cancel_with_reason("interrupted");
    });

    let keyword = keywords.join(" ");
    let result = client.search_songs(&keyword, Some(signal)).await;
    watcher.abort();

    let songs = match result {
        Ok(songs) => songs,
        Err(KuwoError::Http(e)) if e.is_cancel() => {
            info!("Search cancelled");
            return false;
        }
        Err(e) => {
            error!("Search failed: {}", e);
            return false;
        }
    };

    if songs.is_empty() {
        println!("No results for \"{keyword}\"");
        return true;
    }

    let tracks: Vec<Track> = songs
        .into_iter()
        .take(limit)
        .map(melodeck_kuwo::KuwoSong::into_track)
        .collect();

    if !with_lyrics {
        for (i, track) in tracks.iter().enumerate() {
            println!("{:>2}. {track}", i + 1);
        }
        return true;
    }

    let fetcher = LyricsFetcher::new(vec![Box::new(KuwoLyricsProvider::new(client))]);
    let results = join_all(tracks.iter().map(|track| fetcher.load(track))).await;

    for (i, (track, result)) in tracks.iter().zip(results).enumerate() {
        match result.as_synced() {
            Some(lyrics) => println!("{:>2}. {track} ({} lines)", i + 1, lyrics.lines.len()),
            None => println!("{:>2}. {track} (no lyrics)", i + 1),
        }
    }
    true
}
