//! Chapter listing parser and chapter resolution
//!
//! The listing interleaves chapter names with duration lines. Parsing
//! accumulates start offsets so the chapter sequence tiles the whole work
//! without gaps or overlaps, which is what containment lookup relies on.

use super::error::ListingError;
use super::timecode;
use serde::Serialize;

/// A named, time-bounded segment of the audiobook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    /// Display title, exactly as it appeared in the listing
    pub name: String,

    /// Chapter length in seconds
    pub duration_seconds: u64,

    /// Cumulative start offset: sum of all preceding chapter durations
    pub start_time: u64,
}

impl Chapter {
    /// Exclusive end of the chapter's `[start, end)` interval
    pub fn end_time(&self) -> u64 {
        self.start_time + self.duration_seconds
    }
}

/// Ordered chapter sequence in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chapters(Vec<Chapter>);

impl Chapters {
    /// Parse the raw chapter listing
    ///
    /// Lines are trimmed and blank lines discarded, then scanned in
    /// name/duration pairs: a line followed by a decodable clock value
    /// becomes a chapter. A name line whose successor does not decode is
    /// skipped and the successor is retried as a name; it is never given a
    /// zero duration.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut chapters = Vec::new();
        let mut cumulative = 0u64;
        let mut i = 0;

        while i < lines.len() {
            let name = lines[i];
            let Some(duration_line) = lines.get(i + 1) else {
                break;
            };

            match timecode::decode(duration_line) {
                Ok(duration) => {
                    chapters.push(Chapter {
                        name: name.to_string(),
                        duration_seconds: duration,
                        start_time: cumulative,
                    });
                    cumulative += duration;
                    i += 2;
                }
                Err(_) => {
                    log::debug!("no duration follows '{}', skipping it as a name", name);
                    i += 1;
                }
            }
        }

        Self(chapters)
    }

    /// Exact-name lookup, first match wins
    pub fn by_name(&self, name: &str) -> Option<(usize, &Chapter)> {
        self.0.iter().enumerate().find(|(_, c)| c.name == name)
    }

    /// Containment lookup: the chapter whose `[start, end)` interval holds
    /// `position`, if any
    pub fn at_position(&self, position: u64) -> Option<(usize, &Chapter)> {
        self.0
            .iter()
            .enumerate()
            .find(|(_, c)| c.start_time <= position && position < c.end_time())
    }

    /// Resolve the owning chapter for a location line
    ///
    /// Name lookup is primary; containment of the decoded position is the
    /// fallback for listings whose chapter column does not match the
    /// chapter listing verbatim.
    pub fn resolve(&self, name: &str, position: u64) -> Result<(usize, &Chapter), ListingError> {
        self.by_name(name)
            .or_else(|| self.at_position(position))
            .ok_or_else(|| ListingError::UnresolvedChapter {
                name: name.to_string(),
                position,
            })
    }

    /// Number of chapters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the listing produced no chapters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the chapters in listing order
    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.0.iter()
    }

    /// Total duration of the whole work
    pub fn total_duration(&self) -> u64 {
        self.0.last().map(Chapter::end_time).unwrap_or(0)
    }
}
