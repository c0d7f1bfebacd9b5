//! Clock text codec
//!
//! Converts between the player's textual clock values ("MM:SS" or
//! "HH:MM:SS") and absolute seconds.

use super::error::ListingError;

/// Decode clock text into seconds
///
/// "MM:SS" is interpreted as zero hours; "HH:MM:SS" is used as-is. Fields
/// are base-10 integers without mandatory zero-padding. A single bare field
/// is rejected: bookmarks always carry at least minutes.
///
/// # Returns
/// * `Ok(u64)` - Total seconds, `((H * 60) + M) * 60 + S`
/// * `Err(ListingError::MalformedTimestamp)` - Wrong field count or a
///   non-numeric field
pub fn decode(text: &str) -> Result<u64, ListingError> {
    let fields: Result<Vec<u64>, _> = text
        .trim()
        .split(':')
        .map(|field| field.parse::<u64>())
        .collect();

    match fields.as_deref() {
        Ok([minutes, seconds]) => Ok(minutes * 60 + seconds),
        Ok([hours, minutes, seconds]) => Ok((hours * 60 + minutes) * 60 + seconds),
        _ => Err(ListingError::MalformedTimestamp {
            text: text.trim().to_string(),
        }),
    }
}

/// Encode seconds as zero-padded "HH:MM:SS" clock text
pub fn encode(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
