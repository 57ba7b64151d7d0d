//! Header-aware chunking of exported page trees.
//!
//! Splits markdown pages into retrieval-sized chunks: a line classifier tags
//! each line, a header-path tracker maintains the breadcrumb of open headers,
//! and a word-threshold segmenter emits [`pagesift_core::Chunk`]s. The walker
//! discovers pages on disk and strips export ids from their names.

pub mod classifier;
pub mod segmenter;
pub mod tracker;
pub mod walker;

pub use classifier::{classify, LineKind};
pub use segmenter::Segmenter;
pub use tracker::HeaderTracker;
pub use walker::{chunk_page, chunk_tree, strip_page_id, walk_pages, PageFile};
