//! LRC lyrics parsing and current-line lookup.
//!
//! Parsing is lenient: untimed lines and malformed tags are skipped, so a
//! hand-edited lyric file never interrupts playback.

use crate::time::secs_to_duration;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single lyric line and the moment it starts, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    pub time: f64,
    pub text: String,
}

impl LyricLine {
    /// Create a line starting at `time` seconds
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }

    fn from_millis(millis: u32, text: &str) -> Self {
        Self::new(f64::from(millis) / 1000.0, text)
    }

    /// Start time as a [`Duration`], clamped at zero
    #[must_use]
    pub fn start_time(&self) -> Duration {
        secs_to_duration(self.time)
    }
}

/// Parse LRC text into lines sorted by start time.
///
/// Every `[MM:SS]`, `[MM:SS.ff]` or `[MM:SS.fff]` tag on a line produces one
/// entry carrying the text that follows the last tag. Lines without a tag are
/// dropped.
#[must_use]
pub fn parse_lyrics(input: &str) -> Vec<LyricLine> {
    let mut lines = Vec::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (times, text) = split_time_tags(line);
        lines.extend(times.into_iter().map(|millis| LyricLine::from_millis(millis, text)));
    }

    // Stable, so repeated tags with equal times keep their encounter order
    lines.sort_by(|a, b| a.time.total_cmp(&b.time));
    lines
}

/// Index of the last line starting at or before `current_time`.
///
/// Returns `None` when `lines` is empty or playback has not reached the first
/// line yet. `lines` must be sorted by time, as returned by [`parse_lyrics`].
#[must_use]
pub fn locate_current_line(lines: &[LyricLine], current_time: f64) -> Option<usize> {
    lines
        .partition_point(|line| line.time <= current_time)
        .checked_sub(1)
}

/// Parsed lyrics plus the ID tags found alongside them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lyrics {
    pub metadata: LyricsMetadata,
    pub lines: Vec<LyricLine>,
}

/// LRC ID tags such as `[ti:Title]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
}

impl Lyrics {
    /// Parse LRC text, keeping recognised ID tags
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut metadata = LyricsMetadata::default();

        for line in input.lines() {
            if let Some((tag, value)) = parse_id_tag(line.trim()) {
                let slot = match tag.to_ascii_lowercase().as_str() {
                    "ti" => &mut metadata.title,
                    "ar" => &mut metadata.artist,
                    "al" => &mut metadata.album,
                    "au" => &mut metadata.author,
                    "by" => &mut metadata.creator,
                    _ => continue,
                };
                *slot = Some(value.to_string());
            }
        }

        Self {
            metadata,
            lines: parse_lyrics(input),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the current line index for a playback position in seconds
    #[must_use]
    pub fn current_line_index(&self, position: f64) -> Option<usize> {
        locate_current_line(&self.lines, position)
    }

    /// Find the current line for a playback position in seconds
    #[must_use]
    pub fn current_line(&self, position: f64) -> Option<&LyricLine> {
        self.current_line_index(position).map(|i| &self.lines[i])
    }

    /// Lines around the current position, e.g. previous/current/next for the overlay
    #[must_use]
    pub fn visible_lines(&self, position: f64, before: usize, after: usize) -> &[LyricLine] {
        let current = self.current_line_index(position).unwrap_or(0);
        let start = current.saturating_sub(before).min(self.lines.len());
        let end = current
            .saturating_add(after)
            .saturating_add(1)
            .min(self.lines.len());

        &self.lines[start..end]
    }
}

/// Collect the time tags of a line (in milliseconds) and the text after the last one
fn split_time_tags(line: &str) -> (Vec<u32>, &str) {
    let mut times = Vec::new();
    let mut cursor = 0;
    let mut text_start = 0;

    while let Some(offset) = line[cursor..].find('[') {
        let open = cursor + offset;
        if let Some((millis, len)) = parse_time_tag(&line[open..]) {
            times.push(millis);
            cursor = open + len;
            text_start = cursor;
        } else {
            cursor = open + 1;
        }
    }

    (times, line[text_start..].trim())
}

/// Parse a leading `[MM:SS]`, `[MM:SS.ff]` or `[MM:SS.fff]` tag.
///
/// Returns the time in milliseconds and the byte length of the tag.
fn parse_time_tag(tag: &str) -> Option<(u32, usize)> {
    let bytes = tag.as_bytes();
    if bytes.len() < 7 || bytes[0] != b'[' || bytes[3] != b':' {
        return None;
    }

    let minutes = parse_digits(&bytes[1..3])?;
    let seconds = parse_digits(&bytes[4..6])?;

    let mut end = 6;
    let mut millis = 0;
    if bytes[end] == b'.' {
        let fraction = &bytes[end + 1..];
        let digits = fraction.iter().take_while(|b| b.is_ascii_digit()).count();
        millis = match digits {
            // hundredths
            2 => parse_digits(&fraction[..2])? * 10,
            3 => parse_digits(&fraction[..3])?,
            _ => return None,
        };
        end += 1 + digits;
    }

    if bytes.get(end) != Some(&b']') {
        return None;
    }

    Some((minutes * 60_000 + seconds * 1000 + millis, end + 1))
}

fn parse_digits(digits: &[u8]) -> Option<u32> {
    digits.iter().try_fold(0_u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}

/// Parse an ID tag like [ti:Title] or [ar:Artist]
fn parse_id_tag(line: &str) -> Option<(&str, &str)> {
    let content = line.strip_prefix('[')?.strip_suffix(']')?;
    let (tag, value) = content.split_once(':')?;

    // Timestamps are not ID tags
    if tag.is_empty() || tag.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some((tag.trim(), value.trim()))
}
