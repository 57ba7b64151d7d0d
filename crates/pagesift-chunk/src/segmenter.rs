//! Word-threshold chunk segmentation with header flush and re-seeding.

use pagesift_core::Chunk;

use crate::classifier::{classify, LineKind};
use crate::tracker::HeaderTracker;

/// Word-count threshold that triggers a chunk flush.
pub const DEFAULT_MAX_WORDS: usize = 300;

/// The header line most recently seen, kept so size-triggered successor
/// chunks can re-open under it.
#[derive(Debug, Clone)]
struct ActiveHeader {
    line: String,
    words: usize,
}

/// Streams the lines of one page into retrieval-sized chunks.
///
/// Feed lines in order, then call [`finish`](Segmenter::finish) to flush the
/// tail. A chunk is emitted when a new header arrives (the accumulated buffer
/// belongs to the previous section) or when the buffered word count reaches
/// the threshold. After a size-triggered flush the active header line is
/// re-seeded into the next buffer, so every continuation chunk names its
/// section.
///
/// Chunk ids are 1-based per page. Blank lines never reach the buffer, and a
/// flush of an empty buffer emits nothing, so consecutive headers do not
/// produce empty chunks.
///
/// # Examples
///
/// ```
/// use pagesift_chunk::Segmenter;
///
/// let mut segmenter = Segmenter::new("Notes", None, 300);
/// assert!(segmenter.feed("# Title").is_none());
/// assert!(segmenter.feed("Some body text.").is_none());
/// let chunk = segmenter.finish().unwrap();
/// assert_eq!(chunk.chunk_id, 1);
/// assert_eq!(chunk.header_path, vec!["Title".to_string()]);
/// assert_eq!(chunk.content, "# Title\nSome body text.");
/// ```
#[derive(Debug)]
pub struct Segmenter {
    page: String,
    page_id: Option<String>,
    max_words: usize,
    tracker: HeaderTracker,
    buffer: Vec<String>,
    word_count: usize,
    active_header: Option<ActiveHeader>,
    next_chunk_id: u32,
}

impl Segmenter {
    /// Start segmenting a page. `max_words` is the flush threshold.
    pub fn new(page: impl Into<String>, page_id: Option<String>, max_words: usize) -> Self {
        Self {
            page: page.into(),
            page_id,
            max_words,
            tracker: HeaderTracker::new(),
            buffer: Vec::new(),
            word_count: 0,
            active_header: None,
            next_chunk_id: 1,
        }
    }

    /// Consume one line; returns a chunk when this line completed one.
    ///
    /// A header line first flushes the buffer under the old path, then opens
    /// the new section with itself as the first buffered line. A content line
    /// that pushes the word count to the threshold flushes everything
    /// accumulated so far, header included, and re-seeds the header.
    pub fn feed(&mut self, line: &str) -> Option<Chunk> {
        match classify(line) {
            LineKind::Blank => None,
            LineKind::Header { level, text } => {
                let flushed = self.flush();
                let header_line = line.trim().to_string();
                let words = count_words(&header_line);
                self.tracker.on_header(level, text);
                self.buffer.push(header_line.clone());
                self.word_count += words;
                self.active_header = Some(ActiveHeader {
                    line: header_line,
                    words,
                });
                flushed
            }
            LineKind::Content(text) => {
                self.word_count += count_words(text);
                self.buffer.push(text.to_string());
                if self.word_count >= self.max_words {
                    let flushed = self.flush();
                    if let Some(header) = &self.active_header {
                        self.buffer.push(header.line.clone());
                        self.word_count = header.words;
                    }
                    flushed
                } else {
                    None
                }
            }
        }
    }

    /// Flush whatever remains buffered. Call once, after the last line.
    pub fn finish(mut self) -> Option<Chunk> {
        self.flush()
    }

    fn flush(&mut self) -> Option<Chunk> {
        let content = self.buffer.join("\n").trim().to_string();
        self.buffer.clear();
        self.word_count = 0;
        if content.is_empty() {
            return None;
        }

        let plain_text = derive_plain_text(&content);
        let chunk = Chunk {
            page: self.page.clone(),
            page_id: self.page_id.clone(),
            chunk_id: self.next_chunk_id,
            header_path: self.tracker.current(),
            content,
            plain_text: Some(plain_text),
        };
        self.next_chunk_id += 1;
        Some(chunk)
    }
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Content with header `#` markers stripped, for lexical indexing.
fn derive_plain_text(content: &str) -> String {
    content
        .lines()
        .map(|line| match classify(line) {
            LineKind::Header { text, .. } => text.trim(),
            LineKind::Content(text) => text,
            LineKind::Blank => "",
        })
        .collect::<Vec<_>>()
        .join("\n")
}
