//! Three-stage listing pipeline
//!
//! 1. **Parsing**: chapter listing into chapters with cumulative offsets
//! 2. **Reconciliation**: bookmark listing resolved against those chapters
//! 3. **Export**: reconciled bookmarks rendered as Markdown
//!
//! Every stage is a pure function of its inputs; the pipeline holds no
//! state across invocations and may run concurrently on independent
//! inputs.

use crate::markdown_exporter;
use crate::source_model::{self, Bookmark, Chapters};
use thiserror::Error;

/// Default token separating the three sections of a combined host payload
///
/// Chosen by the launcher workflow because it cannot plausibly appear in a
/// chapter listing, a bookmark listing, or a URL.
pub const DEFAULT_SEPARATOR: &str = "xXx";

/// The three raw text sections supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSections<'a> {
    /// Deep-link template shared by all bookmarks
    pub base_link: &'a str,
    /// Raw chapter listing
    pub chapters: &'a str,
    /// Raw bookmark listing
    pub bookmarks: &'a str,
}

/// Fatal top-level input shape error
///
/// Unlike the per-record [`source_model::ListingError`] conditions, a
/// malformed combined payload cannot be partially recovered and is
/// surfaced to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The combined payload did not split into exactly three sections
    #[error("expected 3 sections separated by '{separator}', found {found}")]
    SectionCount {
        /// Separator the payload was split on
        separator: String,
        /// Number of sections actually found
        found: usize,
    },
}

/// Split a combined host payload into its three sections
///
/// The payload carries base link, chapter listing and bookmark listing in
/// that order. Each section is trimmed of surrounding whitespace.
pub fn split_input<'a>(raw: &'a str, separator: &str) -> Result<RawSections<'a>, InputError> {
    let parts: Vec<&str> = raw.split(separator).collect();
    let [base_link, chapters, bookmarks] = parts.as_slice() else {
        return Err(InputError::SectionCount {
            separator: separator.to_string(),
            found: parts.len(),
        });
    };

    Ok(RawSections {
        base_link: base_link.trim(),
        chapters: chapters.trim(),
        bookmarks: bookmarks.trim(),
    })
}

/// Stage 1: parse the chapter listing
pub fn parse_chapters(text: &str) -> Chapters {
    let chapters = Chapters::parse(text);
    log::info!(
        "parsed {} chapters covering {}s",
        chapters.len(),
        chapters.total_duration()
    );
    chapters
}

/// Stage 2: parse the bookmark listing against the chapters
pub fn parse_bookmarks(text: &str, chapters: &Chapters) -> Vec<Bookmark> {
    let bookmarks = source_model::parse_bookmarks(text, chapters);
    log::info!("parsed {} bookmarks", bookmarks.len());
    bookmarks
}

/// Stage 3: render the sorted bookmarks as Markdown
pub fn render_markdown(bookmarks: &[Bookmark], base_link: &str) -> String {
    markdown_exporter::render(bookmarks, base_link)
}

/// Run all three stages over already-split sections
pub fn process(sections: &RawSections<'_>) -> String {
    let chapters = parse_chapters(sections.chapters);
    let bookmarks = parse_bookmarks(sections.bookmarks, &chapters);
    render_markdown(&bookmarks, sections.base_link)
}
