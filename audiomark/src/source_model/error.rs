//! Error types for listing parsing and chapter resolution

use thiserror::Error;

/// Errors that can occur while parsing the chapter and bookmark listings
///
/// Every variant is local to a single record: the bookmark parser logs the
/// error, drops the offending record, and continues with the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// Clock text that does not split into 2 or 3 colon-separated integer fields
    #[error("malformed timestamp '{text}'")]
    MalformedTimestamp {
        /// The clock text as it appeared in the listing
        text: String,
    },

    /// Neither name lookup nor containment lookup found an owning chapter
    #[error("no chapter named '{name}' and no chapter contains position {position}s")]
    UnresolvedChapter {
        /// Chapter name half of the location line
        name: String,
        /// Decoded absolute position in seconds
        position: u64,
    },

    /// Location line without a usable " / " separator
    #[error("malformed location line '{line}'")]
    MalformedLocationLine {
        /// The full input line
        line: String,
    },

    /// Line where "<date> | <time>" metadata was expected but did not parse
    #[error("malformed metadata line '{line}'")]
    MalformedMetadataLine {
        /// The full input line
        line: String,
    },
}
