//! Bookmark listing parser
//!
//! Each bookmark occupies a variable-length run of lines: a location line,
//! a metadata line, and either a note line followed by a navigation spacer
//! or the navigation placeholder standing in for an empty note. The parser
//! is a small state machine over the scanned lines; a transition failure
//! drops the in-progress record, logs why, and resumes looking for the next
//! location line. Nothing in this stage is fatal.

use super::chapter::Chapters;
use super::error::ListingError;
use super::scanner::{self, Line, LineKind};
use super::timecode;
use serde::Serialize;

/// Note text used when the listing indicates an empty note
pub const BLANK_NOTE: &str = "(blank)";

/// A user-created timestamped annotation resolved against the chapters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bookmark {
    /// Name of the owning chapter
    pub chapter_name: String,

    /// 0-based index of the owning chapter in the chapter sequence
    pub chapter_index: usize,

    /// Clock text exactly as captured from the listing, not re-normalized
    pub timestamp: String,

    /// Absolute position in the whole work, decoded from `timestamp`
    pub position_seconds: u64,

    /// Position within the owning chapter, in percent; inconsistent source
    /// data may legitimately push this outside `[0, 100]`
    pub percentage: f64,

    /// Date text copied verbatim from the metadata line
    pub date: String,

    /// Time text copied verbatim from the metadata line
    pub time: String,

    /// Free note text, or [`BLANK_NOTE`]
    pub note: String,
}

/// A location line accepted by the state machine, awaiting its metadata
struct PendingLocation {
    chapter_name: String,
    chapter_index: usize,
    timestamp: String,
    position_seconds: u64,
    percentage: f64,
}

/// Location plus metadata, awaiting the note line
struct PendingRecord {
    location: PendingLocation,
    date: String,
    time: String,
}

impl PendingRecord {
    fn into_bookmark(self, note: String) -> Bookmark {
        Bookmark {
            chapter_name: self.location.chapter_name,
            chapter_index: self.location.chapter_index,
            timestamp: self.location.timestamp,
            position_seconds: self.location.position_seconds,
            percentage: self.location.percentage,
            date: self.date,
            time: self.time,
            note,
        }
    }
}

/// Parser states; partial record data rides along in the variant
enum State {
    /// Looking for the next location line
    ExpectLocation,
    /// Location accepted, the next line must be "<date> | <time>"
    ExpectMetadata(PendingLocation),
    /// Metadata accepted, the next line is the note or the nav placeholder
    ExpectNote(PendingRecord),
    /// Real note consumed; the following spacer line is discarded
    SkipSpacer,
}

/// Parse the raw bookmark listing against the resolved chapter sequence
///
/// Malformed lines never abort the batch: the offending record is dropped
/// with a diagnostic and parsing continues. The result is sorted by
/// absolute position; the sort is stable, so records at equal positions
/// keep their listing order. Reaching the end of input mid-record emits no
/// partial bookmark.
pub fn parse_bookmarks(text: &str, chapters: &Chapters) -> Vec<Bookmark> {
    let mut bookmarks = Vec::new();
    let mut state = State::ExpectLocation;

    for line in scanner::scan(text) {
        state = match state {
            State::ExpectLocation => accept_location(&line, chapters),
            State::ExpectMetadata(pending) => accept_metadata(&line, pending),
            State::ExpectNote(record) => accept_note(&line, record, &mut bookmarks),
            State::SkipSpacer => State::ExpectLocation,
        };
    }

    bookmarks.sort_by_key(|b| b.position_seconds);
    bookmarks
}

/// Try to open a record at a location line
fn accept_location(line: &Line<'_>, chapters: &Chapters) -> State {
    let (chapter_text, timestamp) = match line.kind {
        LineKind::Location { chapter, timestamp } => (chapter, timestamp),
        LineKind::Placeholder => return State::ExpectLocation,
        _ => {
            log::debug!(
                "{}",
                ListingError::MalformedLocationLine {
                    line: line.raw.to_string(),
                }
            );
            return State::ExpectLocation;
        }
    };

    let position_seconds = match timecode::decode(timestamp) {
        Ok(seconds) => seconds,
        Err(e) => {
            log::warn!("skipping bookmark: {}", e);
            return State::ExpectLocation;
        }
    };

    let (chapter_index, chapter) = match chapters.resolve(chapter_text, position_seconds) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("skipping bookmark: {}", e);
            return State::ExpectLocation;
        }
    };

    if chapter.duration_seconds == 0 {
        log::warn!(
            "skipping bookmark at {}: chapter '{}' has zero duration",
            timestamp,
            chapter.name
        );
        return State::ExpectLocation;
    }

    // Signed arithmetic: a by-name match can put the position before the
    // chapter's own start, and the percentage passes through unclamped.
    let offset = position_seconds as f64 - chapter.start_time as f64;
    let percentage = offset / chapter.duration_seconds as f64 * 100.0;

    log::debug!(
        "time {} ({}s) assigned to chapter {} (starts at {}s, duration {}s)",
        timestamp,
        position_seconds,
        chapter.name,
        chapter.start_time,
        chapter.duration_seconds
    );

    State::ExpectMetadata(PendingLocation {
        chapter_name: chapter.name.clone(),
        chapter_index,
        timestamp: timestamp.to_string(),
        position_seconds,
        percentage,
    })
}

/// Attach the "<date> | <time>" line to a pending location
fn accept_metadata(line: &Line<'_>, pending: PendingLocation) -> State {
    match line.kind {
        LineKind::Metadata { date, time } => State::ExpectNote(PendingRecord {
            location: pending,
            date: date.to_string(),
            time: time.to_string(),
        }),
        _ => {
            log::warn!(
                "{}",
                ListingError::MalformedMetadataLine {
                    line: line.raw.to_string(),
                }
            );
            State::ExpectLocation
        }
    }
}

/// Close a record with its note line
///
/// The navigation placeholder in note position means the note was empty
/// and occupies a single line; a real note line is followed by the
/// placeholder as a spacer, which the next transition discards.
fn accept_note(line: &Line<'_>, record: PendingRecord, bookmarks: &mut Vec<Bookmark>) -> State {
    if matches!(line.kind, LineKind::Placeholder) {
        bookmarks.push(record.into_bookmark(BLANK_NOTE.to_string()));
        return State::ExpectLocation;
    }

    let note = line.raw.trim_matches(|c: char| c == ' ' || c == '"');
    bookmarks.push(record.into_bookmark(note.to_string()));
    State::SkipSpacer
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ch1 runs [0, 600), Ch2 runs [600, 900)
    fn chapters() -> Chapters {
        Chapters::parse("Ch1\n10:00\nCh2\n05:00\n")
    }

    #[test]
    fn test_full_record_with_note() {
        let text = "Ch1 / 00:05:00\n2024-01-01 | 10:00\nmy note\n[Go to bookmark]\n";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 1);
        let b = &bookmarks[0];
        assert_eq!(b.chapter_name, "Ch1");
        assert_eq!(b.chapter_index, 0);
        assert_eq!(b.timestamp, "00:05:00");
        assert_eq!(b.position_seconds, 300);
        assert_eq!(b.percentage, 50.0);
        assert_eq!(b.date, "2024-01-01");
        assert_eq!(b.time, "10:00");
        assert_eq!(b.note, "my note");
    }

    #[test]
    fn test_placeholder_in_note_position_means_blank() {
        let text = "Ch1 / 00:05:00\n2024-01-01 | 10:00\n[Go to bookmark]\n";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].note, BLANK_NOTE);
    }

    #[test]
    fn test_note_is_stripped_of_quotes_and_space() {
        let text = "Ch1 / 00:05:00\n2024-01-01 | 10:00\n  \"quoted note\"  \n[Go to bookmark]\n";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks[0].note, "quoted note");
    }

    #[test]
    fn test_consecutive_records() {
        let text = "\
Ch1 / 00:05:00
2024-01-01 | 10:00
first note
[Go to bookmark]
Ch2 / 10:30
2024-01-02 | 11:30
[Go to bookmark]
";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].note, "first note");
        assert_eq!(bookmarks[1].chapter_name, "Ch2");
        assert_eq!(bookmarks[1].position_seconds, 630);
        assert_eq!(bookmarks[1].percentage, 10.0);
        assert_eq!(bookmarks[1].note, BLANK_NOTE);
    }

    #[test]
    fn test_resolution_by_containment_when_name_unknown() {
        // The listing's chapter column does not match the chapter listing,
        // but 630s falls inside Ch2.
        let text = "Kapitel 2 / 10:30\n2024-01-01 | 10:00\n[Go to bookmark]\n";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].chapter_name, "Ch2");
        assert_eq!(bookmarks[0].chapter_index, 1);
    }

    #[test]
    fn test_missing_separator_skips_line_only() {
        let text = "\
not a location line
Ch1 / 00:05:00
2024-01-01 | 10:00
[Go to bookmark]
";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].position_seconds, 300);
    }

    #[test]
    fn test_malformed_timestamp_skips_record() {
        let text = "\
Ch1 / not:a:time
2024-01-01 | 10:00
lost note
[Go to bookmark]
Ch1 / 02:00
2024-01-02 | 11:00
[Go to bookmark]
";
        let bookmarks = parse_bookmarks(text, &chapters());

        // Only the second record survives; the first never became a
        // bookmark and its trailing lines were consumed without one.
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].position_seconds, 120);
    }

    #[test]
    fn test_unresolved_chapter_skips_record() {
        // 16:40 = 1000s, past the end of the last chapter, and the name
        // matches nothing.
        let text = "Nowhere / 16:40\n2024-01-01 | 10:00\n[Go to bookmark]\n";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert!(bookmarks.is_empty());
    }

    #[test]
    fn test_malformed_metadata_drops_record_and_continues() {
        let text = "\
Ch1 / 00:05:00
not metadata at all
Ch1 / 02:00
2024-01-02 | 11:00
[Go to bookmark]
";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].position_seconds, 120);
    }

    #[test]
    fn test_truncated_input_emits_no_partial_record() {
        let after_location = "Ch1 / 00:05:00\n";
        assert!(parse_bookmarks(after_location, &chapters()).is_empty());

        let after_metadata = "Ch1 / 00:05:00\n2024-01-01 | 10:00\n";
        assert!(parse_bookmarks(after_metadata, &chapters()).is_empty());
    }

    #[test]
    fn test_output_sorted_by_position() {
        let text = "\
Ch2 / 10:30
2024-01-01 | 10:00
late
[Go to bookmark]
Ch1 / 00:30
2024-01-02 | 11:00
early
[Go to bookmark]
";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].note, "early");
        assert_eq!(bookmarks[1].note, "late");
    }

    #[test]
    fn test_sort_is_stable_for_equal_positions() {
        let text = "\
Ch1 / 00:30
2024-01-01 | 10:00
first in listing
[Go to bookmark]
Ch1 / 00:30
2024-01-02 | 11:00
second in listing
[Go to bookmark]
";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks[0].note, "first in listing");
        assert_eq!(bookmarks[1].note, "second in listing");
    }

    #[test]
    fn test_note_that_looks_like_a_location_line() {
        // The raw note text is preserved even though the line would
        // classify as a location line on its own.
        let text = "Ch1 / 00:05:00\n2024-01-01 | 10:00\nsee Part 2 / 01:00\n[Go to bookmark]\n";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].note, "see Part 2 / 01:00");
    }

    #[test]
    fn test_name_match_outside_chapter_bounds_is_not_clamped() {
        // "Ch1" matches by name although 10:30 lies inside Ch2; the
        // percentage runs past 100 and is passed through untouched.
        let text = "Ch1 / 10:30\n2024-01-01 | 10:00\n[Go to bookmark]\n";
        let bookmarks = parse_bookmarks(text, &chapters());

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].chapter_name, "Ch1");
        assert_eq!(bookmarks[0].percentage, 105.0);
    }

    #[test]
    fn test_empty_listing() {
        assert!(parse_bookmarks("", &chapters()).is_empty());
        assert!(parse_bookmarks("\n\n", &chapters()).is_empty());
    }
}
