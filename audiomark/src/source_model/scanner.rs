//! Line scanner for the bookmark listing
//!
//! Splits the raw listing into trimmed non-blank lines and tags each one
//! with the shape it matches on its own. The tags are a first approximation:
//! a note line may look like anything, so the bookmark parser's state
//! machine decides what a line means in context and falls back to the raw
//! text where it needs to.

/// Navigation placeholder the player emits between bookmark entries
pub const NAV_PLACEHOLDER: &str = "[Go to bookmark]";

/// Separator between the chapter name and the timestamp on a location line
const LOCATION_SEPARATOR: &str = " / ";

/// Separator between the date and the time on a metadata line
const METADATA_SEPARATOR: &str = " | ";

/// Shape tag for a single listing line
///
/// Tags are assigned with fixed precedence: placeholder, then location,
/// then metadata. Chapter names may themselves contain the location
/// separator, which is why location lines split on its LAST occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// "[Go to bookmark]" navigation line
    Placeholder,

    /// "<chapter-name> / <timestamp>"
    Location {
        /// Everything before the last separator
        chapter: &'a str,
        /// Clock text after the last separator, trimmed
        timestamp: &'a str,
    },

    /// "<date> | <time>"
    Metadata {
        /// Date text, copied verbatim downstream
        date: &'a str,
        /// Time text, copied verbatim downstream
        time: &'a str,
    },

    /// Anything else: note text or stray content
    Text,
}

/// A trimmed listing line together with its shape tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The trimmed line as it appeared in the listing
    pub raw: &'a str,
    /// Context-free shape classification
    pub kind: LineKind<'a>,
}

/// Classify one trimmed non-blank line
fn classify(line: &str) -> LineKind<'_> {
    if line.contains(NAV_PLACEHOLDER) {
        return LineKind::Placeholder;
    }

    if let Some((chapter, timestamp)) = line.rsplit_once(LOCATION_SEPARATOR) {
        return LineKind::Location {
            chapter,
            timestamp: timestamp.trim(),
        };
    }

    let mut fields = line.split(METADATA_SEPARATOR);
    if let (Some(date), Some(time), None) = (fields.next(), fields.next(), fields.next()) {
        return LineKind::Metadata { date, time };
    }

    LineKind::Text
}

/// Lazily scan the listing into tagged lines
pub fn scan(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|raw| Line {
            raw,
            kind: classify(raw),
        })
}
