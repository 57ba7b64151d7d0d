//! Discovery of exported pages on disk.

use std::path::{Path, PathBuf};

use pagesift_core::{Chunk, SiftError};

use crate::segmenter::Segmenter;

/// Length of the hex id that exporters append to page file names.
const PAGE_ID_LEN: usize = 32;

/// A markdown page discovered under the export root.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use pagesift_chunk::walker::PageFile;
///
/// let page = PageFile {
///     page: "Roadmap".into(),
///     page_id: Some("0123456789abcdef0123456789abcdef".into()),
///     path: PathBuf::from("export/Roadmap 0123456789abcdef0123456789abcdef.md"),
/// };
/// assert_eq!(page.page, "Roadmap");
/// ```
#[derive(Debug, Clone)]
pub struct PageFile {
    /// Page title, export id stripped.
    pub page: String,
    /// The stripped export id, when present.
    pub page_id: Option<String>,
    /// Full path to the markdown file.
    pub path: PathBuf,
}

/// Split a page name into title and trailing export id.
///
/// Exporters name files `"Title <32-char hex id>"`; the id is the last
/// space-separated token and must be exactly 32 characters. Anything else is
/// kept as part of the title.
///
/// # Examples
///
/// ```
/// use pagesift_chunk::strip_page_id;
///
/// let (page, id) = strip_page_id("Roadmap 0123456789abcdef0123456789abcdef");
/// assert_eq!(page, "Roadmap");
/// assert_eq!(id.as_deref(), Some("0123456789abcdef0123456789abcdef"));
///
/// let (page, id) = strip_page_id("Plain Title");
/// assert_eq!(page, "Plain Title");
/// assert!(id.is_none());
/// ```
pub fn strip_page_id(name: &str) -> (String, Option<String>) {
    if let Some((base, tail)) = name.rsplit_once(' ') {
        if tail.chars().count() == PAGE_ID_LEN {
            return (base.to_string(), Some(tail.to_string()));
        }
    }
    (name.to_string(), None)
}

/// Walk the export tree and return every markdown page, sorted by path.
///
/// Non-markdown files are skipped; unreadable entries are skipped rather than
/// aborting the walk. Sorting keeps chunk ordinals stable across runs.
///
/// # Errors
///
/// Returns [`SiftError::InputMissing`] if `root` is not a directory.
pub fn walk_pages(root: &Path) -> Result<Vec<PageFile>, SiftError> {
    if !root.is_dir() {
        return Err(SiftError::InputMissing(root.to_path_buf()));
    }

    let walker = ignore::WalkBuilder::new(root).build();
    let mut pages = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        let is_markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("md"));
        if !is_markdown {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let (page, page_id) = strip_page_id(stem);

        pages.push(PageFile {
            page,
            page_id,
            path: path.to_path_buf(),
        });
    }

    pages.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(pages)
}

/// Chunk one page file.
///
/// # Errors
///
/// Returns [`SiftError::Io`] if the file cannot be read.
pub fn chunk_page(file: &PageFile, max_words: usize) -> Result<Vec<Chunk>, SiftError> {
    let text = std::fs::read_to_string(&file.path)?;
    let mut segmenter = Segmenter::new(file.page.clone(), file.page_id.clone(), max_words);
    let mut chunks = Vec::new();

    for line in text.lines() {
        if let Some(chunk) = segmenter.feed(line) {
            chunks.push(chunk);
        }
    }
    if let Some(chunk) = segmenter.finish() {
        chunks.push(chunk);
    }

    Ok(chunks)
}

/// Chunk every page under `root`, in walk order.
///
/// # Errors
///
/// Returns [`SiftError::InputMissing`] if `root` is not a directory, or
/// [`SiftError::Io`] if a discovered page cannot be read.
pub fn chunk_tree(root: &Path, max_words: usize) -> Result<Vec<Chunk>, SiftError> {
    let mut chunks = Vec::new();
    for page in walk_pages(root)? {
        chunks.extend(chunk_page(&page, max_words)?);
    }
    Ok(chunks)
}
