//! Markdown exporter for reconciled bookmarks
//!
//! Renders the sorted bookmark sequence as one Markdown string: a level-4
//! heading per run of consecutive same-chapter bookmarks, and one list item
//! per bookmark carrying a deep link back into the player.

use crate::source_model::Bookmark;
use itertools::Itertools;

/// Query parameter marking where the base link template is truncated
const POSITION_PARAM: &str = "&bookmarkPos";

/// Render bookmarks under chapter headings
///
/// A chapter reappearing after a different chapter gets a fresh heading;
/// only consecutive bookmarks share one. Headings are joined with `"\n\n"`
/// and items with `"\n"`, including before the first heading, so the output
/// starts with a blank line by construction. The percentage is truncated
/// toward zero, never rounded or clamped.
pub fn render(bookmarks: &[Bookmark], base_link: &str) -> String {
    let base = base_link.split(POSITION_PARAM).next().unwrap_or_default();
    let mut output = String::new();

    for (chapter_name, group) in &bookmarks.iter().chunk_by(|b| b.chapter_name.as_str()) {
        output.push_str("\n\n#### ");
        output.push_str(chapter_name);

        for bookmark in group {
            let link = bookmark_link(base, bookmark);
            output.push_str(&format!(
                "\n- [{} {}%]({}) - {}",
                bookmark.timestamp, bookmark.percentage as i64, link, bookmark.note
            ));
        }
    }

    output
}

/// Build the per-bookmark deep link
///
/// The player addresses positions in milliseconds and chapters by index;
/// the trailing `#` keeps launchers from appending their own fragment.
fn bookmark_link(base: &str, bookmark: &Bookmark) -> String {
    format!(
        "{}{}={}&chapterIndex={}#",
        base,
        POSITION_PARAM,
        bookmark.position_seconds * 1000,
        bookmark.chapter_index
    )
}
