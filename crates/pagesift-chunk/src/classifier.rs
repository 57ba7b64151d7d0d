//! Line classification for markdown page content.

/// What a single input line means to the segmenter.
///
/// Classification happens on the whitespace-trimmed line, so indented headers
/// and trailing whitespace do not change the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A markdown header: one to six `#` marks, a space, then a non-empty title.
    Header {
        /// Header depth, 1..=6.
        level: u8,
        /// Title text after the marker, untrimmed beyond the single separator space.
        text: &'a str,
    },
    /// Any other non-blank line, trimmed.
    Content(&'a str),
    /// Whitespace-only line; dropped before any other logic runs.
    Blank,
}

/// Classify one line of page text.
///
/// Seven or more `#` marks, or `#` marks without a following space, are
/// ordinary content, matching markdown header rules.
///
/// # Examples
///
/// ```
/// use pagesift_chunk::classifier::{classify, LineKind};
///
/// assert_eq!(
///     classify("## Roadmap"),
///     LineKind::Header { level: 2, text: "Roadmap" }
/// );
/// assert_eq!(classify("plain text"), LineKind::Content("plain text"));
/// assert_eq!(classify("   "), LineKind::Blank);
/// assert_eq!(classify("#######nope"), LineKind::Content("#######nope"));
/// ```
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    let marks = trimmed.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&marks) {
        if let Some(text) = trimmed[marks..].strip_prefix(' ') {
            if !text.trim().is_empty() {
                return LineKind::Header {
                    level: marks as u8,
                    text,
                };
            }
        }
    }

    LineKind::Content(trimmed)
}
