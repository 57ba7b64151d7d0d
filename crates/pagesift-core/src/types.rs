use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiftError;

/// Content placeholder used when a search hit cannot be resolved back to a
/// stored chunk (e.g. the store was rebuilt with fewer records than the index).
pub const CONTENT_UNAVAILABLE: &str = "Content not available";

/// One retrieval-sized slice of a page, annotated with the header path that
/// was open where the slice ended.
///
/// Field names match the JSON Lines store format, so a serialized `Chunk` is
/// exactly one store record.
///
/// # Examples
///
/// ```
/// use pagesift_core::Chunk;
///
/// let chunk = Chunk {
///     page: "Roadmap".into(),
///     page_id: Some("a1b2c3d4e5f60718293a4b5c6d7e8f90".into()),
///     chunk_id: 1,
///     header_path: vec!["Q3".into(), "Launch".into()],
///     content: "## Launch\nShip it.".into(),
///     plain_text: Some("Launch\nShip it.".into()),
/// };
/// assert_eq!(chunk.header_path_text(), "Q3 > Launch");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Page title with any trailing export id stripped.
    pub page: String,
    /// The 32-character export id, when the file name carried one.
    pub page_id: Option<String>,
    /// 1-based position of this chunk within its page.
    pub chunk_id: u32,
    /// Header titles from the page root down to the innermost open header.
    pub header_path: Vec<String>,
    /// Raw chunk text, header lines included.
    pub content: String,
    /// Content with header markers stripped, for lexical indexing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

impl Chunk {
    /// Render the header path as a ` > `-joined breadcrumb.
    pub fn header_path_text(&self) -> String {
        render_header_path(&self.header_path)
    }
}

/// Render a header path for display, with a placeholder for content that
/// appeared before the first header of its page.
pub(crate) fn render_header_path(path: &[String]) -> String {
    if path.is_empty() {
        "(no header)".to_string()
    } else {
        path.join(" > ")
    }
}

/// Distance convention pinned into a search index at creation time.
///
/// # Examples
///
/// ```
/// use pagesift_core::{Distance, ScoreOrder};
///
/// assert_eq!(Distance::Cosine.score_order(), ScoreOrder::Descending);
/// assert_eq!("l2".parse::<Distance>().unwrap(), Distance::L2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// Cosine similarity; higher scores are better.
    #[default]
    Cosine,
    /// Euclidean distance; lower scores are better.
    L2,
}

impl Distance {
    /// Which way scores under this convention rank.
    pub fn score_order(self) -> ScoreOrder {
        match self {
            Distance::Cosine => ScoreOrder::Descending,
            Distance::L2 => ScoreOrder::Ascending,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Cosine => write!(f, "cosine"),
            Distance::L2 => write!(f, "l2"),
        }
    }
}

impl FromStr for Distance {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosine" => Ok(Distance::Cosine),
            "l2" | "euclidean" => Ok(Distance::L2),
            other => Err(SiftError::Config(format!(
                "unknown distance '{other}' (expected: cosine, l2)"
            ))),
        }
    }
}

/// Ranking direction of the scores on a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreOrder {
    /// Higher scores rank first (cosine similarity, lexical rank).
    Descending,
    /// Lower scores rank first (euclidean distance).
    Ascending,
}

impl fmt::Display for ScoreOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreOrder::Descending => write!(f, "higher is better"),
            ScoreOrder::Ascending => write!(f, "lower is better"),
        }
    }
}

/// Structured constraints applied inside the search index before ranking.
///
/// # Examples
///
/// ```
/// use pagesift_core::SearchFilter;
///
/// let filter = SearchFilter {
///     page: Some("Roadmap".into()),
///     header: None,
/// };
/// assert!(!filter.is_empty());
/// assert!(SearchFilter::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Exact page title to match.
    pub page: Option<String>,
    /// Substring of the rendered header path to match.
    pub header: Option<String>,
}

impl SearchFilter {
    /// `true` when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.header.is_none()
    }
}

/// One resolved search hit.
#[derive(Debug, Clone, Serialize)]
pub struct RankedChunk {
    /// Position of the chunk in the store file; the index's identifier.
    pub ordinal: u64,
    /// Score under the result set's [`ScoreOrder`].
    pub score: f64,
    /// Page title.
    pub page: String,
    /// Header breadcrumb for the chunk.
    pub header_path: Vec<String>,
    /// Chunk content, or [`CONTENT_UNAVAILABLE`] if the ordinal did not
    /// resolve against the store.
    pub content: String,
}

impl RankedChunk {
    /// Render the header path as a ` > `-joined breadcrumb.
    pub fn header_path_text(&self) -> String {
        render_header_path(&self.header_path)
    }
}

/// Ranked hits plus the score convention they were ranked under.
///
/// The façade never re-sorts or sign-flips scores; `order` tells callers how
/// to read them.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// Ranking direction of `hits[..].score`.
    pub order: ScoreOrder,
    /// Hits in index-returned order.
    pub hits: Vec<RankedChunk>,
}

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(SiftError::Config(format!(
                "unknown output format '{other}' (expected: text, json)"
            ))),
        }
    }
}
